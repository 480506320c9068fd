/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/crds/log_collector.rs
*
* LogCollector installs the log collection components (fluentd and the EKS
* audit log forwarder) and configures where logs are shipped in addition to
* the default log storage.
*
* SPDX-License-Identifier: Apache-2.0 */

use serde::{Deserialize, Serialize};

use super::overrides::{ComponentContainers, WorkloadOverride};
use super::{OperatorObject, OperatorSpec};
use crate::diagnostics::Diagnostics;
use crate::validation::{self, field, Validate};

pub type LogCollector = OperatorObject<LogCollectorSpec>;

pub const EKS_LOG_FORWARDER: ComponentContainers = ComponentContainers {
    containers: &["eks-log-forwarder"],
    init_containers: &["eks-log-forwarder-startup"],
};

pub const FLUENTD: ComponentContainers = ComponentContainers {
    containers: &["fluentd"],
    init_containers: &["tigera-fluentd-prometheus-tls-key-cert-provisioner"],
};

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogCollectorSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_sources: Option<AdditionalLogSources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_stores: Option<AdditionalLogStores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_process_path: Option<CollectProcessPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eks_log_forwarder_deployment: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluentd_daemon_set: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_tenant_management_cluster_namespace: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalLogSources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eks_cloudwatch_log: Option<EksCloudwatchLogsSource>,
}

/// Where to read EKS audit logs from.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EksCloudwatchLogsSource {
    /// Cloudwatch audit logs fetching interval in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_interval: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_prefix: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalLogStores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3StoreSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splunk: Option<SplunkStoreSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syslog: Option<SyslogStoreSpec>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct S3StoreSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SplunkStoreSpec {
    /// Location of the Splunk HTTP Event Collector end point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyslogStoreSpec {
    /// Location of the syslog server, e.g. `tcp://1.2.3.4:601`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<SyslogEncryption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_types: Option<Vec<SyslogLogType>>,
    /// Maximum syslog packet size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_size: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyslogEncryption {
    #[serde(rename = "None")]
    Plain,
    #[serde(rename = "TLS")]
    Tls,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyslogLogType {
    Audit,
    #[serde(rename = "DNS")]
    Dns,
    Flows,
    #[serde(rename = "IDSEvents")]
    IdsEvents,
    L7,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectProcessPath {
    Enable,
    Disable,
}

impl OperatorSpec for LogCollectorSpec {
    const KIND: &'static str = "LogCollector";
    const PLURAL: &'static str = "logcollectors";
    const TYPE_SUFFIX: &'static str = "log_collector";
}

impl Validate for LogCollectorSpec {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        if let Some(eks) = self
            .additional_sources
            .as_ref()
            .and_then(|s| s.eks_cloudwatch_log.as_ref())
        {
            let eks_path = field(&field(path, "additionalSources"), "eksCloudwatchLog");
            validation::validate_non_negative(
                &field(&eks_path, "fetchInterval"),
                eks.fetch_interval.map(i64::from),
                diags,
            );
            validation::validate_required(&field(&eks_path, "groupName"), eks.group_name.as_deref(), diags);
            validation::validate_required(&field(&eks_path, "region"), eks.region.as_deref(), diags);
        }

        if let Some(stores) = &self.additional_stores {
            let stores_path = field(path, "additionalStores");
            if let Some(s3) = &stores.s3 {
                let s3_path = field(&stores_path, "s3");
                validation::validate_required(&field(&s3_path, "bucketName"), s3.bucket_name.as_deref(), diags);
                validation::validate_required(&field(&s3_path, "bucketPath"), s3.bucket_path.as_deref(), diags);
                validation::validate_required(&field(&s3_path, "region"), s3.region.as_deref(), diags);
            }
            if let Some(splunk) = &stores.splunk {
                validation::validate_required(
                    &field(&field(&stores_path, "splunk"), "endpoint"),
                    splunk.endpoint.as_deref(),
                    diags,
                );
            }
            if let Some(syslog) = &stores.syslog {
                let syslog_path = field(&stores_path, "syslog");
                validation::validate_required(&field(&syslog_path, "endpoint"), syslog.endpoint.as_deref(), diags);
                validation::validate_non_negative(
                    &field(&syslog_path, "packetSize"),
                    syslog.packet_size.map(i64::from),
                    diags,
                );
            }
        }

        if let Some(forwarder) = &self.eks_log_forwarder_deployment {
            forwarder.validate_for(&field(path, "eksLogForwarderDeployment"), &EKS_LOG_FORWARDER, diags);
        }
        if let Some(fluentd) = &self.fluentd_daemon_set {
            fluentd.validate_for(&field(path, "fluentdDaemonSet"), &FLUENTD, diags);
        }
    }
}
