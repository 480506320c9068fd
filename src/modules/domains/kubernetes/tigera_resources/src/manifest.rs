/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/manifest.rs
*
* Manifest data sources: render a typed operator.tigera.io object into the
* YAML document a user would `kubectl apply`. Rendering is pure; no client is
* created and no request is sent.
*
* SPDX-License-Identifier: Apache-2.0 */

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crds::{OperatorObject, OperatorSpec, OBJECT_FIELDS};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::resource::PROVIDER_ATTRIBUTES;
use crate::validation::validate_known_keys;

/// State of a manifest data source. `id` and `yaml` are computed.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default", serialize = "S: Serialize"))]
pub struct ManifestModel<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub object: OperatorObject<S>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaml: Option<String>,
}

impl<S: OperatorSpec> ManifestModel<S> {
    pub fn new(object: OperatorObject<S>) -> Self {
        Self {
            id: None,
            object,
            yaml: None,
        }
    }

    /// Parses a manifest model. Model files are shared with managed
    /// resources, so provider attributes are accepted and ignored; any other
    /// unknown top-level key is an invalid attribute.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: serde_yaml::Value = serde_yaml::from_str(content)?;
        let mut diags = Diagnostics::new();
        let known = [&OBJECT_FIELDS[..], &PROVIDER_ATTRIBUTES[..], &["yaml"][..]].concat();
        validate_known_keys(&document, &known, &mut diags);
        diags.into_result()?;
        Ok(serde_yaml::from_value(document)?)
    }

    /// Fills `apiVersion`, `kind`, `id` and `yaml`.
    ///
    /// The rendered document contains only the object itself, so feeding it
    /// back through `serde_yaml` yields the same `OperatorObject`.
    pub fn render(mut self) -> Result<Self> {
        self.object.set_type_meta();
        self.object.diagnostics().into_result()?;
        self.id = Some(self.object.metadata.name.clone());
        let yaml = serde_yaml::to_string(&self.object)?;
        debug!("Rendered {} '{}' manifest.", S::KIND, self.object.name());
        self.yaml = Some(yaml);
        Ok(self)
    }
}
