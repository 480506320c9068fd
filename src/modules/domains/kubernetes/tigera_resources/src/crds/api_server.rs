/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/crds/api_server.rs
*
* APIServer installs the Calico/Tigera API server and its query server.
*
* SPDX-License-Identifier: Apache-2.0 */

use serde::{Deserialize, Serialize};

use super::overrides::{ComponentContainers, WorkloadOverride};
use super::{OperatorObject, OperatorSpec};
use crate::diagnostics::Diagnostics;
use crate::validation::{field, Validate};

pub type APIServer = OperatorObject<APIServerSpec>;

pub const API_SERVER_DEPLOYMENT: ComponentContainers = ComponentContainers {
    containers: &[
        "calico-apiserver",
        "tigera-queryserver",
        "calico-l7-admission-controller",
    ],
    init_containers: &["calico-apiserver-certs-key-cert-provisioner"],
};

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct APIServerSpec {
    /// Customization of the API server Deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server_deployment: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<APIServerLogging>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct APIServerLogging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server: Option<ComponentLogging>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_server: Option<ComponentLogging>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLogging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_severity: Option<LogSeverity>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogSeverity {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl OperatorSpec for APIServerSpec {
    const KIND: &'static str = "APIServer";
    const PLURAL: &'static str = "apiservers";
    const TYPE_SUFFIX: &'static str = "api_server";
}

impl Validate for APIServerSpec {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        if let Some(deployment) = &self.api_server_deployment {
            deployment.validate_for(
                &field(path, "apiServerDeployment"),
                &API_SERVER_DEPLOYMENT,
                diags,
            );
        }
    }
}
