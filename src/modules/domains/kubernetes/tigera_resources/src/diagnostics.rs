/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/diagnostics.rs
*
* User-facing diagnostics. Every failure of a provider operation ends up here
* as a `Diagnostic` with a short summary and a human-readable detail, and
* optionally the attribute path it concerns. The summaries are stable strings
* callers can match on; the details carry the underlying error message.
*
* SPDX-License-Identifier: Apache-2.0 */

use serde::Serialize;
use std::fmt;

use crate::error::Error;

pub const SUMMARY_MARSHAL: &str = "Unable to marshal resource";
pub const SUMMARY_UNMARSHAL: &str = "Unable to unmarshal resource";
pub const SUMMARY_YAML: &str = "Unable to marshal YAML";
pub const SUMMARY_PATCH: &str = "Unable to PATCH resource";
pub const SUMMARY_GET: &str = "Unable to GET resource";
pub const SUMMARY_DELETE: &str = "Unable to DELETE resource";
pub const SUMMARY_IMPORT: &str = "Error importing resource";
pub const SUMMARY_INVALID: &str = "Invalid attribute value";
pub const SUMMARY_WAIT: &str = "Unable to wait for resource";
pub const SUMMARY_CLIENT: &str = "Unable to create Kubernetes client";
pub const SUMMARY_UNCONFIGURED: &str = "Provider not configured";
pub const SUMMARY_CONFIG: &str = "Invalid provider configuration";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute path in JSON notation, e.g. `spec.logging.apiServer.logSeverity`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(summary, detail)
        }
    }

    pub fn at(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        write!(f, "{}: {}", level, self.summary)?;
        if let Some(attribute) = &self.attribute {
            write!(f, " (at {})", attribute)?;
        }
        if !self.detail.is_empty() {
            write!(f, "\n  {}", self.detail)?;
        }
        Ok(())
    }
}

/// An ordered collection of diagnostics produced by a single operation.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::error(summary, detail));
    }

    /// Records an invalid attribute value at `attribute`.
    pub fn add_attribute_error(&mut self, attribute: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::error(SUMMARY_INVALID, detail).at(attribute));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Turns the collected diagnostics into `Err(Error::Validation)` when any of them is an error.
    pub fn into_result(self) -> Result<(), Error> {
        if self.has_error() {
            Err(Error::Validation(self))
        } else {
            Ok(())
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl From<Error> for Diagnostics {
    fn from(err: Error) -> Self {
        let err = match err {
            Error::Validation(diagnostics) => return diagnostics,
            other => other,
        };
        let summary = match &err {
            Error::Validation(_) => SUMMARY_INVALID,
            Error::Marshal(_) => SUMMARY_MARSHAL,
            Error::Unmarshal(_) => SUMMARY_UNMARSHAL,
            Error::Yaml(_) => SUMMARY_YAML,
            Error::Patch { .. } => SUMMARY_PATCH,
            Error::Get { .. } => SUMMARY_GET,
            Error::Delete { .. } => SUMMARY_DELETE,
            Error::ImportId(_) => SUMMARY_IMPORT,
            Error::WaitTimeout { .. } | Error::Wait { .. } => SUMMARY_WAIT,
            Error::InvalidDuration(_) | Error::InvalidJsonPath(_) => SUMMARY_INVALID,
            Error::Kubeconfig(_) | Error::InferConfig(_) | Error::Client(_) => SUMMARY_CLIENT,
            Error::Unconfigured => SUMMARY_UNCONFIGURED,
            Error::Config(_) | Error::Io(_) => SUMMARY_CONFIG,
        };
        Diagnostic::error(summary, err.to_string()).into()
    }
}
