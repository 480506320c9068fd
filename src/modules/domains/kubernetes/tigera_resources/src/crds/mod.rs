/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/crds/mod.rs
*
* Typed models of the operator.tigera.io/v1 custom resources.
*
* Architecture:
* - Every kind shares the same envelope, `OperatorObject<S>`: `apiVersion`,
*   `kind`, a reduced `metadata` (name, labels, annotations) and an optional
*   kind-specific `spec`. Fields the server adds (status, uid, managedFields)
*   are dropped on deserialization, so a model read back from the cluster only
*   holds what a configuration can express.
* - The kind-specific part is the `OperatorSpec` trait: it names the kind, its
*   plural and the suffix used in provider type names, which is all the
*   generic adapter needs to build a dynamic `ApiResource`.
* - All kinds customise operator-managed workloads through the shared override
*   tree in `overrides.rs`.
* - `serde` attributes map idiomatic Rust `snake_case` onto the `camelCase`
*   used by Kubernetes, and every optional field is omitted from the wire form
*   when unset.
*
* SPDX-License-Identifier: Apache-2.0 */

use kube::core::{ApiResource, GroupVersionKind};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::diagnostics::Diagnostics;
use crate::validation::{self, field, Validate};

pub mod api_server;
pub mod compliance;
pub mod log_collector;
pub mod log_storage;
pub mod overrides;

pub use api_server::{APIServer, APIServerSpec};
pub use compliance::{Compliance, ComplianceSpec};
pub use log_collector::{LogCollector, LogCollectorSpec};
pub use log_storage::{LogStorage, LogStorageSpec};

pub const GROUP: &str = "operator.tigera.io";
pub const VERSION: &str = "v1";
pub const API_VERSION: &str = "operator.tigera.io/v1";

/// Top-level keys of a serialized `OperatorObject`.
pub const OBJECT_FIELDS: [&str; 4] = ["apiVersion", "kind", "metadata", "spec"];

/// Kind-specific half of an operator.tigera.io/v1 object.
pub trait OperatorSpec:
    Serialize + DeserializeOwned + Clone + Debug + Default + PartialEq + Validate + Send + Sync + 'static
{
    const KIND: &'static str;
    const PLURAL: &'static str;
    /// Used to build provider type names, e.g. `log_storage` in
    /// `k8s_operator_tigera_io_log_storage_v1`.
    const TYPE_SUFFIX: &'static str;
}

/// The subset of `ObjectMeta` a configuration may set.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl Metadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Validate for Metadata {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        validation::validate_name(&field(path, "name"), &self.name, diags);
        if let Some(labels) = &self.labels {
            validation::validate_labels(&field(path, "labels"), labels, diags);
        }
        if let Some(annotations) = &self.annotations {
            validation::validate_annotations(&field(path, "annotations"), annotations, diags);
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperatorObject<S> {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S: OperatorSpec> OperatorObject<S> {
    /// Creates an object of kind `S::KIND` with the given name and no spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: S::KIND.to_string(),
            metadata: Metadata::named(name),
            spec: None,
        }
    }

    pub fn with_spec(mut self, spec: S) -> Self {
        self.spec = Some(spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Overwrites `apiVersion` and `kind` with the fixed values for `S`.
    pub fn set_type_meta(&mut self) {
        self.api_version = API_VERSION.to_string();
        self.kind = S::KIND.to_string();
    }

    /// Describes the resource for the dynamic client.
    pub fn api_resource() -> ApiResource {
        let gvk = GroupVersionKind::gvk(GROUP, VERSION, S::KIND);
        ApiResource::from_gvk_with_plural(&gvk, S::PLURAL)
    }

    /// Runs every client-side check and returns the collected diagnostics.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();
        self.validate("", &mut diags);
        diags
    }
}

impl<S: OperatorSpec> Validate for OperatorObject<S> {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        self.metadata.validate(&field(path, "metadata"), diags);
        self.spec.validate(&field(path, "spec"), diags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_type_meta() {
        let obj = LogStorage::new("tigera-secure");
        assert_eq!(obj.api_version, "operator.tigera.io/v1");
        assert_eq!(obj.kind, "LogStorage");
        assert_eq!(obj.name(), "tigera-secure");
    }

    #[test]
    fn test_api_resource_for_each_kind() {
        let ar = APIServer::api_resource();
        assert_eq!(ar.group, "operator.tigera.io");
        assert_eq!(ar.version, "v1");
        assert_eq!(ar.api_version, "operator.tigera.io/v1");
        assert_eq!(ar.kind, "APIServer");
        assert_eq!(ar.plural, "apiservers");

        assert_eq!(Compliance::api_resource().plural, "compliances");
        assert_eq!(LogCollector::api_resource().plural, "logcollectors");
        assert_eq!(LogStorage::api_resource().plural, "logstorages");
    }

    #[test]
    fn test_server_fields_are_dropped() {
        let from_server = serde_json::json!({
            "apiVersion": "operator.tigera.io/v1",
            "kind": "Compliance",
            "metadata": {
                "name": "tigera-secure",
                "uid": "8c2f6a36-0000-0000-0000-000000000000",
                "resourceVersion": "4711",
                "managedFields": [{"manager": "tigera-provider"}],
                "labels": {"team": "netsec"}
            },
            "spec": {},
            "status": {"state": "Ready"}
        });
        let obj: Compliance = serde_json::from_value(from_server).unwrap();
        let back = serde_json::to_value(&obj).unwrap();
        assert_eq!(
            back,
            serde_json::json!({
                "apiVersion": "operator.tigera.io/v1",
                "kind": "Compliance",
                "metadata": {"name": "tigera-secure", "labels": {"team": "netsec"}},
                "spec": {}
            })
        );
    }

    #[test]
    fn test_missing_name_is_reported() {
        let obj = APIServer::default();
        let diags = obj.diagnostics();
        assert!(diags.has_error());
        assert_eq!(
            diags.iter().next().unwrap().attribute.as_deref(),
            Some("metadata.name")
        );
    }
}
