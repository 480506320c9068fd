/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/error.rs
*
* Error type shared by every operation in the library. Each variant maps to
* exactly one user-facing diagnostic summary (see `diagnostics.rs`); nothing
* here is retried or classified further.
*
* SPDX-License-Identifier: Apache-2.0 */

use std::time::Duration;
use thiserror::Error;

use crate::diagnostics::Diagnostics;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Marshal(#[source] serde_json::Error),

    #[error("{0}")]
    Unmarshal(#[source] serde_json::Error),

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("PATCH of '{name}' failed: {source}")]
    Patch {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("GET of '{name}' failed: {source}")]
    Get {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("DELETE of '{name}' failed: {source}")]
    Delete {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Expected import identifier with format: 'name' Got: '{0}'")]
    ImportId(String),

    #[error("{} attribute value(s) failed validation", .0.len())]
    Validation(Diagnostics),

    #[error("timed out after {timeout:?} waiting for '{name}'")]
    WaitTimeout { name: String, timeout: Duration },

    #[error("waiting for '{name}' failed: {source}")]
    Wait {
        name: String,
        #[source]
        source: kube::runtime::wait::Error,
    },

    #[error("Invalid duration '{0}', expected <number>s, <number>m or <number>h")]
    InvalidDuration(String),

    #[error("Invalid jsonpath '{0}'")]
    InvalidJsonPath(String),

    #[error("Failed to read kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Failed to infer Kubernetes configuration: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    #[error("Failed to create Kubernetes client: {0}")]
    Client(#[from] kube::Error),

    #[error("The provider has no Kubernetes client; it was configured offline")]
    Unconfigured,

    #[error("Invalid provider configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
