/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/validation.rs
*
* Light client-side validation. The checks here mirror what the API server
* would reject anyway (object names, label and annotation keys, enumerated
* container names, non-negative counts) so problems are reported before any
* request is made, each scoped to the attribute path it concerns.
*
* SPDX-License-Identifier: Apache-2.0 */

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::diagnostics::Diagnostics;

const DNS_SUBDOMAIN_MAX_LEN: usize = 253;
const QUALIFIED_NAME_MAX_LEN: usize = 63;
const LABEL_VALUE_MAX_LEN: usize = 63;
const ANNOTATIONS_MAX_TOTAL_SIZE: usize = 256 * 1024;

static DNS_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("static regex")
});

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").expect("static regex")
});

/// Implemented by every node of the resource model that can check itself.
pub trait Validate {
    fn validate(&self, path: &str, diags: &mut Diagnostics);
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        if let Some(inner) = self {
            inner.validate(path, diags);
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self, path: &str, diags: &mut Diagnostics) {
        for (i, item) in self.iter().enumerate() {
            item.validate(&index(path, i), diags);
        }
    }
}

/// Appends a field name to an attribute path.
pub fn field(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

/// Appends a list index to an attribute path.
pub fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}

fn is_dns_subdomain(value: &str) -> bool {
    !value.is_empty() && value.len() <= DNS_SUBDOMAIN_MAX_LEN && DNS_SUBDOMAIN.is_match(value)
}

/// Checks an object name: required, at most 253 characters, RFC 1123 subdomain.
pub fn validate_name(path: &str, name: &str, diags: &mut Diagnostics) {
    if name.is_empty() {
        diags.add_attribute_error(path, "must not be empty");
    } else if name.len() > DNS_SUBDOMAIN_MAX_LEN {
        diags.add_attribute_error(
            path,
            format!("must be at most {} characters, got {}", DNS_SUBDOMAIN_MAX_LEN, name.len()),
        );
    } else if !DNS_SUBDOMAIN.is_match(name) {
        diags.add_attribute_error(
            path,
            format!(
                "must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character, got '{}'",
                name
            ),
        );
    }
}

/// Checks a `[prefix/]name` key as used by labels and annotations.
pub fn validate_qualified_key(path: &str, key: &str, diags: &mut Diagnostics) {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };
    if let Some(prefix) = prefix {
        if !is_dns_subdomain(prefix) {
            diags.add_attribute_error(
                path,
                format!("key '{}' has an invalid prefix: must be a DNS subdomain", key),
            );
        }
    }
    if name.is_empty() || name.len() > QUALIFIED_NAME_MAX_LEN || !QUALIFIED_NAME.is_match(name) {
        diags.add_attribute_error(
            path,
            format!(
                "key '{}' has an invalid name: must be 1-{} alphanumeric characters, '-', '_' or '.', starting and ending with an alphanumeric character",
                key, QUALIFIED_NAME_MAX_LEN
            ),
        );
    }
}

pub fn validate_labels(path: &str, labels: &BTreeMap<String, String>, diags: &mut Diagnostics) {
    for (key, value) in labels {
        let entry = format!("{}[\"{}\"]", path, key);
        validate_qualified_key(&entry, key, diags);
        if value.len() > LABEL_VALUE_MAX_LEN || !(value.is_empty() || QUALIFIED_NAME.is_match(value)) {
            diags.add_attribute_error(
                &entry,
                format!(
                    "value '{}' must be empty or at most {} alphanumeric characters, '-', '_' or '.', starting and ending with an alphanumeric character",
                    value, LABEL_VALUE_MAX_LEN
                ),
            );
        }
    }
}

pub fn validate_annotations(
    path: &str,
    annotations: &BTreeMap<String, String>,
    diags: &mut Diagnostics,
) {
    let mut total = 0;
    for (key, value) in annotations {
        validate_qualified_key(&format!("{}[\"{}\"]", path, key), key, diags);
        total += key.len() + value.len();
    }
    if total > ANNOTATIONS_MAX_TOTAL_SIZE {
        diags.add_attribute_error(
            path,
            format!(
                "total size of annotations must be at most {} bytes, got {}",
                ANNOTATIONS_MAX_TOTAL_SIZE, total
            ),
        );
    }
}

pub fn validate_one_of(path: &str, value: &str, allowed: &[&str], diags: &mut Diagnostics) {
    if !allowed.contains(&value) {
        diags.add_attribute_error(
            path,
            format!("value must be one of {:?}, got '{}'", allowed, value),
        );
    }
}

pub fn validate_non_negative(path: &str, value: Option<i64>, diags: &mut Diagnostics) {
    if let Some(v) = value {
        if v < 0 {
            diags.add_attribute_error(path, format!("must be greater than or equal to 0, got {}", v));
        }
    }
}

/// Reports a missing or empty value for an attribute the API server requires.
pub fn validate_required(path: &str, value: Option<&str>, diags: &mut Diagnostics) {
    if value.map_or(true, str::is_empty) {
        diags.add_attribute_error(path, "is required");
    }
}

/// Reports every top-level key of a mapping document that is not in `known`.
/// Non-mapping documents are left to the deserializer.
pub fn validate_known_keys(document: &serde_yaml::Value, known: &[&str], diags: &mut Diagnostics) {
    let Some(mapping) = document.as_mapping() else {
        return;
    };
    for key in mapping.keys() {
        let name = match key.as_str() {
            Some(name) => name.to_string(),
            None => serde_yaml::to_string(key).map_or_else(|_| "?".to_string(), |k| k.trim().to_string()),
        };
        if !known.contains(&name.as_str()) {
            diags.add_attribute_error(name, "unknown attribute");
        }
    }
}
