/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/provider.rs
*
* The provider surface. A `Provider` owns the configuration and at most one
* Kubernetes client, knows the names of every resource type and data source
* it serves, and exposes the lifecycle operations generically over the kind.
*
* Every operation returns `Diagnostics` on failure: this is the boundary where
* library errors become the summaries and details a user sees.
*
* SPDX-License-Identifier: Apache-2.0 */

use kube::Client;
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::client;
use crate::config::ProviderConfig;
use crate::crds::{APIServerSpec, ComplianceSpec, LogCollectorSpec, LogStorageSpec, OperatorSpec};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::manifest::ManifestModel;
use crate::resource::{ResourceAdapter, ResourceModel};

pub const TYPE_PREFIX: &str = "k8s_operator_tigera_io_";

/// The kinds served by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    APIServer,
    Compliance,
    LogCollector,
    LogStorage,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::APIServer,
        ResourceKind::Compliance,
        ResourceKind::LogCollector,
        ResourceKind::LogStorage,
    ];

    pub fn kind(self) -> &'static str {
        match self {
            ResourceKind::APIServer => APIServerSpec::KIND,
            ResourceKind::Compliance => ComplianceSpec::KIND,
            ResourceKind::LogCollector => LogCollectorSpec::KIND,
            ResourceKind::LogStorage => LogStorageSpec::KIND,
        }
    }

    pub fn type_suffix(self) -> &'static str {
        match self {
            ResourceKind::APIServer => APIServerSpec::TYPE_SUFFIX,
            ResourceKind::Compliance => ComplianceSpec::TYPE_SUFFIX,
            ResourceKind::LogCollector => LogCollectorSpec::TYPE_SUFFIX,
            ResourceKind::LogStorage => LogStorageSpec::TYPE_SUFFIX,
        }
    }

    /// e.g. `k8s_operator_tigera_io_log_storage_v1`
    pub fn resource_type_name(self) -> String {
        format!("{}{}_v1", TYPE_PREFIX, self.type_suffix())
    }

    /// e.g. `k8s_operator_tigera_io_log_storage_v1_manifest`
    pub fn data_source_type_name(self) -> String {
        format!("{}_manifest", self.resource_type_name())
    }

    /// Resolves a resource type or data source type name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.resource_type_name() == name || k.data_source_type_name() == name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Accepts the kind (`LogStorage`, case-insensitive), the type suffix
/// (`log_storage`) or a full type name.
impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_type_name(s)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|k| k.kind().eq_ignore_ascii_case(s) || k.type_suffix() == s)
            })
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.kind()).collect();
                format!("unknown kind '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

pub struct Provider {
    config: ProviderConfig,
    client: Option<Client>,
}

impl Provider {
    /// Validates the configuration and, unless offline, creates the client.
    pub async fn configure(config: ProviderConfig) -> Result<Self, Diagnostics> {
        config.validate()?;
        if config.offline {
            info!("Provider configured offline; only manifest data sources are available.");
            return Ok(Self::offline(config));
        }
        let client = client::initialize_client(&config).await?;
        info!(
            "Provider configured with field manager '{}'.",
            config.field_manager
        );
        Ok(Self::with_client(config, client))
    }

    pub fn offline(config: ProviderConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    pub fn with_client(config: ProviderConfig, client: Client) -> Self {
        Self {
            config,
            client: Some(client),
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn resource_types() -> Vec<String> {
        ResourceKind::ALL
            .into_iter()
            .map(ResourceKind::resource_type_name)
            .collect()
    }

    pub fn data_source_types() -> Vec<String> {
        ResourceKind::ALL
            .into_iter()
            .map(ResourceKind::data_source_type_name)
            .collect()
    }

    fn adapter<S: OperatorSpec>(&self) -> Result<ResourceAdapter<S>, Diagnostics> {
        let client = self.client.clone().ok_or(Error::Unconfigured)?;
        Ok(ResourceAdapter::new(client, self.config.apply_defaults()))
    }

    /// Runs the client-side checks only. Works offline.
    pub fn validate<S: OperatorSpec>(&self, model: &ResourceModel<S>) -> Result<(), Diagnostics> {
        let diags = model.diagnostics();
        if diags.has_error() {
            Err(diags)
        } else {
            Ok(())
        }
    }

    pub async fn create<S: OperatorSpec>(
        &self,
        model: ResourceModel<S>,
    ) -> Result<ResourceModel<S>, Diagnostics> {
        Ok(self.adapter::<S>()?.create(model).await?)
    }

    pub async fn read<S: OperatorSpec>(
        &self,
        model: ResourceModel<S>,
    ) -> Result<ResourceModel<S>, Diagnostics> {
        Ok(self.adapter::<S>()?.read(model).await?)
    }

    pub async fn update<S: OperatorSpec>(
        &self,
        model: ResourceModel<S>,
    ) -> Result<ResourceModel<S>, Diagnostics> {
        Ok(self.adapter::<S>()?.update(model).await?)
    }

    pub async fn delete<S: OperatorSpec>(&self, model: &ResourceModel<S>) -> Result<(), Diagnostics> {
        Ok(self.adapter::<S>()?.delete(model).await?)
    }

    pub fn import_state<S: OperatorSpec>(&self, id: &str) -> Result<ResourceModel<S>, Diagnostics> {
        Ok(ResourceAdapter::<S>::import_state(id)?)
    }

    /// Renders a manifest data source. Works offline.
    pub fn manifest<S: OperatorSpec>(
        &self,
        model: ManifestModel<S>,
    ) -> Result<ManifestModel<S>, Diagnostics> {
        Ok(model.render()?)
    }
}
