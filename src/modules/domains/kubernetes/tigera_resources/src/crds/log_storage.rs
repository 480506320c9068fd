/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/crds/log_storage.rs
*
* LogStorage installs the Elasticsearch-backed log storage: the ECK operator,
* the Elasticsearch cluster and its node sets, Kibana, Linseed and the
* metrics exporter, together with index replication and retention settings.
*
* SPDX-License-Identifier: Apache-2.0 */

use k8s_openapi::api::core::v1::ResourceRequirements;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::overrides::{ComponentContainers, WorkloadOverride};
use super::{OperatorObject, OperatorSpec};
use crate::diagnostics::Diagnostics;
use crate::validation::{self, field, index, Validate};

pub type LogStorage = OperatorObject<LogStorageSpec>;

pub const ECK_OPERATOR: ComponentContainers = ComponentContainers {
    containers: &["manager"],
    init_containers: &[],
};

pub const ELASTICSEARCH_METRICS: ComponentContainers = ComponentContainers {
    containers: &["tigera-elasticsearch-metrics"],
    init_containers: &["tigera-ee-elasticsearch-metrics-tls-key-cert-provisioner"],
};

pub const KIBANA: ComponentContainers = ComponentContainers {
    containers: &["kibana"],
    init_containers: &["key-cert-provisioner"],
};

pub const LINSEED: ComponentContainers = ComponentContainers {
    containers: &["tigera-linseed"],
    init_containers: &[
        "tigera-secure-linseed-token-tls-key-cert-provisioner",
        "tigera-secure-linseed-cert-key-cert-provisioner",
    ],
};

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogStorageSpec {
    /// Deprecated in favour of `eckOperatorStatefulSet`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_resources: Option<Vec<LogStorageComponentResource>>,
    /// Node selector for the Elasticsearch data nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_node_selector: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eck_operator_stateful_set: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elasticsearch_metrics_deployment: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Indices>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kibana: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linseed_deployment: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Nodes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention: Option<Retention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogStorageComponentResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<LogStorageComponentName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_requirements: Option<ResourceRequirements>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogStorageComponentName {
    #[serde(rename = "ECKOperator")]
    EckOperator,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Indices {
    /// Number of replicas per index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nodes {
    /// Number of Elasticsearch nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_sets: Option<Vec<NodeSet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_requirements: Option<ResourceRequirements>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_attributes: Option<Vec<NodeSetSelectionAttribute>>,
}

/// Maps a Kubernetes node label onto an Elasticsearch node attribute.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeSetSelectionAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Retention periods in days.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Retention {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_reports: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_reports: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgp_logs: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_reports: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_logs: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l7_logs: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<i32>,
}

impl OperatorSpec for LogStorageSpec {
    const KIND: &'static str = "LogStorage";
    const PLURAL: &'static str = "logstorages";
    const TYPE_SUFFIX: &'static str = "log_storage";
}

impl Validate for Retention {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        let periods = [
            ("auditReports", self.audit_reports),
            ("benchmarkReports", self.benchmark_reports),
            ("bgpLogs", self.bgp_logs),
            ("complianceReports", self.compliance_reports),
            ("dnsLogs", self.dns_logs),
            ("flows", self.flows),
            ("l7Logs", self.l7_logs),
            ("snapshots", self.snapshots),
        ];
        for (name, days) in periods {
            validation::validate_non_negative(&field(path, name), days.map(i64::from), diags);
        }
    }
}

impl Validate for Nodes {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        let count_path = field(path, "count");
        if self.count.is_none() {
            diags.add_attribute_error(count_path, "is required");
        } else {
            validation::validate_non_negative(&count_path, self.count, diags);
        }
        let sets_path = field(path, "nodeSets");
        for (i, set) in self.node_sets.iter().flatten().enumerate() {
            let attrs_path = field(&index(&sets_path, i), "selectionAttributes");
            for (j, attr) in set.selection_attributes.iter().flatten().enumerate() {
                let attr_path = index(&attrs_path, j);
                validation::validate_required(&field(&attr_path, "name"), attr.name.as_deref(), diags);
                if let Some(label) = attr.node_label.as_deref() {
                    validation::validate_qualified_key(&field(&attr_path, "nodeLabel"), label, diags);
                } else {
                    diags.add_attribute_error(field(&attr_path, "nodeLabel"), "is required");
                }
                validation::validate_required(&field(&attr_path, "value"), attr.value.as_deref(), diags);
            }
        }
    }
}

impl Validate for LogStorageSpec {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        if let Some(selector) = &self.data_node_selector {
            validation::validate_labels(&field(path, "dataNodeSelector"), selector, diags);
        }
        let workloads = [
            ("eckOperatorStatefulSet", &self.eck_operator_stateful_set, &ECK_OPERATOR),
            ("elasticsearchMetricsDeployment", &self.elasticsearch_metrics_deployment, &ELASTICSEARCH_METRICS),
            ("kibana", &self.kibana, &KIBANA),
            ("linseedDeployment", &self.linseed_deployment, &LINSEED),
        ];
        for (name, workload, allowed) in workloads {
            if let Some(workload) = workload {
                workload.validate_for(&field(path, name), allowed, diags);
            }
        }
        if let Some(indices) = &self.indices {
            validation::validate_non_negative(
                &field(&field(path, "indices"), "replicas"),
                indices.replicas.map(i64::from),
                diags,
            );
        }
        self.nodes.validate(&field(path, "nodes"), diags);
        self.retention.validate(&field(path, "retention"), diags);
    }
}
