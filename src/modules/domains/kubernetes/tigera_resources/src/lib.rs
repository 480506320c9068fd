/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/lib.rs
*
* Entry point of the `tigera_resources` library. It exposes the custom
* resources of the `operator.tigera.io/v1` API group in two shapes:
*
* - as managed resources, applied to a cluster with Server-Side Apply through
*   a dynamic `kube` client (`resource`), and
* - as read-only manifest data sources that render the typed configuration to
*   YAML without touching the network (`manifest`).
*
* Both shapes share one typed data model (`crds`), one set of client-side
* validators (`validation`) and one diagnostics type that carries failures
* back to the caller (`diagnostics`). The `provider` module ties these
* together behind a per-instance client handle.
*
* SPDX-License-Identifier: Apache-2.0 */

pub mod client;
pub mod config;
pub mod crds;
pub mod diagnostics;
pub mod error;
pub mod manifest;
pub mod provider;
pub mod resource;
pub mod validation;
pub mod wait;

pub use config::ProviderConfig;
pub use crds::{
    APIServer, APIServerSpec, Compliance, ComplianceSpec, LogCollector, LogCollectorSpec,
    LogStorage, LogStorageSpec, Metadata, OperatorObject, OperatorSpec,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use manifest::ManifestModel;
pub use provider::{Provider, ResourceKind};
pub use resource::{DeletionPropagation, ResourceAdapter, ResourceModel};
