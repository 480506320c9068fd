/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/crds/overrides.rs
*
* The override tree every operator.tigera.io kind uses to customise the
* Deployments, DaemonSets and StatefulSets the operator renders: metadata,
* `minReadySeconds`, and a pod template limited to scheduling and container
* resources. Scheduling and resource types are the upstream core/v1 ones.
*
* Container names are not free-form: each component only accepts the names of
* the containers the operator actually renders for it, described by a
* `ComponentContainers` table in the kind's module.
*
* SPDX-License-Identifier: Apache-2.0 */

use k8s_openapi::api::core::v1::{
    Affinity, ResourceRequirements, Toleration, TopologySpreadConstraint,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::diagnostics::Diagnostics;
use crate::validation::{self, field, index};

const TOLERATION_OPERATORS: &[&str] = &["Exists", "Equal"];
const TOLERATION_EFFECTS: &[&str] = &["NoSchedule", "PreferNoSchedule", "NoExecute"];
const WHEN_UNSATISFIABLE: &[&str] = &["DoNotSchedule", "ScheduleAnyway"];

/// Container names a component accepts in its pod template overrides.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContainers {
    pub containers: &'static [&'static str],
    pub init_containers: &'static [&'static str],
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverrideMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl OverrideMetadata {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        if let Some(labels) = &self.labels {
            validation::validate_labels(&field(path, "labels"), labels, diags);
        }
        if let Some(annotations) = &self.annotations {
            validation::validate_annotations(&field(path, "annotations"), annotations, diags);
        }
    }
}

/// Override for a Deployment, DaemonSet or StatefulSet owned by the operator.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OverrideMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<WorkloadOverrideSpec>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadOverrideSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ready_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateOverride>,
}

/// Pod template override wrapped in its own object, as used by the compliance reporter.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateResourceOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OverrideMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateOverride>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OverrideMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<PodSpecOverride>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSpecOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Affinity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<ContainerOverride>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_containers: Option<Vec<ContainerOverride>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology_spread_constraints: Option<Vec<TopologySpreadConstraint>>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerOverride {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

impl ContainerOverride {
    pub fn new(name: impl Into<String>, resources: ResourceRequirements) -> Self {
        Self {
            name: name.into(),
            resources: Some(resources),
        }
    }
}

impl WorkloadOverride {
    pub fn validate_for(&self, path: &str, allowed: &ComponentContainers, diags: &mut Diagnostics) {
        if let Some(metadata) = &self.metadata {
            metadata.validate(&field(path, "metadata"), diags);
        }
        if let Some(spec) = &self.spec {
            let spec_path = field(path, "spec");
            validation::validate_non_negative(
                &field(&spec_path, "minReadySeconds"),
                spec.min_ready_seconds.map(i64::from),
                diags,
            );
            if let Some(template) = &spec.template {
                template.validate_for(&field(&spec_path, "template"), allowed, diags);
            }
        }
    }
}

impl PodTemplateResourceOverride {
    pub fn validate_for(&self, path: &str, allowed: &ComponentContainers, diags: &mut Diagnostics) {
        if let Some(metadata) = &self.metadata {
            metadata.validate(&field(path, "metadata"), diags);
        }
        if let Some(template) = &self.template {
            template.validate_for(&field(path, "template"), allowed, diags);
        }
    }
}

impl PodTemplateOverride {
    pub fn validate_for(&self, path: &str, allowed: &ComponentContainers, diags: &mut Diagnostics) {
        if let Some(metadata) = &self.metadata {
            metadata.validate(&field(path, "metadata"), diags);
        }
        if let Some(spec) = &self.spec {
            spec.validate_for(&field(path, "spec"), allowed, diags);
        }
    }
}

impl PodSpecOverride {
    pub fn validate_for(&self, path: &str, allowed: &ComponentContainers, diags: &mut Diagnostics) {
        if let Some(containers) = &self.containers {
            validate_containers(&field(path, "containers"), containers, allowed.containers, diags);
        }
        if let Some(init_containers) = &self.init_containers {
            validate_containers(
                &field(path, "initContainers"),
                init_containers,
                allowed.init_containers,
                diags,
            );
        }
        if let Some(node_selector) = &self.node_selector {
            validation::validate_labels(&field(path, "nodeSelector"), node_selector, diags);
        }
        if let Some(tolerations) = &self.tolerations {
            validate_tolerations(&field(path, "tolerations"), tolerations, diags);
        }
        if let Some(constraints) = &self.topology_spread_constraints {
            let list_path = field(path, "topologySpreadConstraints");
            for (i, constraint) in constraints.iter().enumerate() {
                let item = index(&list_path, i);
                if constraint.max_skew < 1 {
                    diags.add_attribute_error(
                        field(&item, "maxSkew"),
                        format!("must be greater than 0, got {}", constraint.max_skew),
                    );
                }
                validation::validate_one_of(
                    &field(&item, "whenUnsatisfiable"),
                    &constraint.when_unsatisfiable,
                    WHEN_UNSATISFIABLE,
                    diags,
                );
            }
        }
    }
}

fn validate_containers(
    path: &str,
    containers: &[ContainerOverride],
    allowed: &[&str],
    diags: &mut Diagnostics,
) {
    for (i, container) in containers.iter().enumerate() {
        let name_path = field(&index(path, i), "name");
        if allowed.is_empty() {
            diags.add_attribute_error(
                name_path,
                format!("this component has no containers that can be overridden, got '{}'", container.name),
            );
        } else {
            validation::validate_one_of(&name_path, &container.name, allowed, diags);
        }
    }
}

/// Checks toleration operators and effects; `Exists` must not carry a value.
pub fn validate_tolerations(path: &str, tolerations: &[Toleration], diags: &mut Diagnostics) {
    for (i, toleration) in tolerations.iter().enumerate() {
        let item = index(path, i);
        if let Some(operator) = &toleration.operator {
            validation::validate_one_of(&field(&item, "operator"), operator, TOLERATION_OPERATORS, diags);
            if operator == "Exists" && toleration.value.as_deref().is_some_and(|v| !v.is_empty()) {
                diags.add_attribute_error(
                    field(&item, "value"),
                    "must be empty when operator is 'Exists'",
                );
            }
        }
        if let Some(effect) = &toleration.effect {
            validation::validate_one_of(&field(&item, "effect"), effect, TOLERATION_EFFECTS, diags);
        }
    }
}
