/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/crds/compliance.rs
*
* Compliance installs the compliance reporting components: the controller,
* the CIS benchmarker DaemonSet, the server, the snapshotter and the pod
* template used for on-demand reporter jobs.
*
* SPDX-License-Identifier: Apache-2.0 */

use serde::{Deserialize, Serialize};

use super::overrides::{ComponentContainers, PodTemplateResourceOverride, WorkloadOverride};
use super::{OperatorObject, OperatorSpec};
use crate::diagnostics::Diagnostics;
use crate::validation::{field, Validate};

pub type Compliance = OperatorObject<ComplianceSpec>;

pub const CONTROLLER: ComponentContainers = ComponentContainers {
    containers: &["compliance-controller"],
    init_containers: &["tigera-compliance-controller-tls-key-cert-provisioner"],
};

pub const BENCHMARKER: ComponentContainers = ComponentContainers {
    containers: &["compliance-benchmarker"],
    init_containers: &["tigera-compliance-benchmarker-tls-key-cert-provisioner"],
};

pub const SERVER: ComponentContainers = ComponentContainers {
    containers: &["compliance-server"],
    init_containers: &["tigera-compliance-server-tls-key-cert-provisioner"],
};

pub const SNAPSHOTTER: ComponentContainers = ComponentContainers {
    containers: &["compliance-snapshotter"],
    init_containers: &["tigera-compliance-snapshotter-tls-key-cert-provisioner"],
};

pub const REPORTER: ComponentContainers = ComponentContainers {
    containers: &["reporter"],
    init_containers: &["tigera-compliance-reporter-tls-key-cert-provisioner"],
};

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_benchmarker_daemon_set: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_controller_deployment: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_reporter_pod_template: Option<PodTemplateResourceOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_server_deployment: Option<WorkloadOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_snapshotter_deployment: Option<WorkloadOverride>,
}

impl OperatorSpec for ComplianceSpec {
    const KIND: &'static str = "Compliance";
    const PLURAL: &'static str = "compliances";
    const TYPE_SUFFIX: &'static str = "compliance";
}

impl Validate for ComplianceSpec {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        let workloads = [
            ("complianceBenchmarkerDaemonSet", &self.compliance_benchmarker_daemon_set, &BENCHMARKER),
            ("complianceControllerDeployment", &self.compliance_controller_deployment, &CONTROLLER),
            ("complianceServerDeployment", &self.compliance_server_deployment, &SERVER),
            ("complianceSnapshotterDeployment", &self.compliance_snapshotter_deployment, &SNAPSHOTTER),
        ];
        for (name, workload, allowed) in workloads {
            if let Some(workload) = workload {
                workload.validate_for(&field(path, name), allowed, diags);
            }
        }
        if let Some(reporter) = &self.compliance_reporter_pod_template {
            reporter.validate_for(&field(path, "complianceReporterPodTemplate"), &REPORTER, diags);
        }
    }
}
