/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/config.rs
*
* Provider-level settings. They are read from an optional YAML or JSON file,
* then overridden by `TIGERA_PROVIDER_*` environment variables, and finally by
* whatever the caller (usually the CLI) sets explicitly.
*
* SPDX-License-Identifier: Apache-2.0 */

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::resource::ApplyDefaults;

pub const DEFAULT_FIELD_MANAGER: &str = "tigera-provider";
pub const ENV_PREFIX: &str = "TIGERA_PROVIDER_";

/// Kubernetes limits `fieldManager` to 128 characters.
const MAX_FIELD_MANAGER_LEN: usize = 128;

fn default_field_manager() -> String {
    DEFAULT_FIELD_MANAGER.to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Path to a kubeconfig file. When unset the configuration is inferred
    /// from `KUBECONFIG`, `~/.kube/config` or the in-cluster environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,
    /// Kubeconfig context to use instead of the current one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default = "default_field_manager")]
    pub field_manager: String,
    #[serde(default)]
    pub force_conflicts: bool,
    /// Only manifest data sources are usable; no client is created.
    #[serde(default)]
    pub offline: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            field_manager: default_field_manager(),
            force_conflicts: false,
            offline: false,
        }
    }
}

impl ProviderConfig {
    /// Reads a configuration file. YAML is a superset of JSON, so both parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies overrides from the process environment.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides using `lookup` to resolve `TIGERA_PROVIDER_*` variables.
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|v| !v.is_empty());

        if let Some(kubeconfig) = var("KUBECONFIG") {
            self.kubeconfig = Some(kubeconfig);
        }
        if let Some(context) = var("CONTEXT") {
            self.context = Some(context);
        }
        if let Some(manager) = var("FIELD_MANAGER") {
            self.field_manager = manager;
        }
        if let Some(force) = var("FORCE_CONFLICTS") {
            self.force_conflicts = parse_bool("FORCE_CONFLICTS", &force)?;
        }
        if let Some(offline) = var("OFFLINE") {
            self.offline = parse_bool("OFFLINE", &offline)?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_manager.trim().is_empty() {
            return Err(Error::Config("field_manager must not be empty".to_string()));
        }
        if self.field_manager.len() > MAX_FIELD_MANAGER_LEN {
            return Err(Error::Config(format!(
                "field_manager must be at most {} characters, got {}",
                MAX_FIELD_MANAGER_LEN,
                self.field_manager.len()
            )));
        }
        if self.offline && (self.kubeconfig.is_some() || self.context.is_some()) {
            return Err(Error::Config(
                "kubeconfig and context cannot be set when offline is true".to_string(),
            ));
        }
        Ok(())
    }

    pub fn apply_defaults(&self) -> ApplyDefaults {
        ApplyDefaults {
            field_manager: self.field_manager.clone(),
            force_conflicts: self.force_conflicts,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(Error::Config(format!(
            "{}{} must be a boolean, got '{}'",
            ENV_PREFIX, name, value
        ))),
    }
}
