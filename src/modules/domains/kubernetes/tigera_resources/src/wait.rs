/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/wait.rs
*
* Optional waiting after apply and delete. After a PATCH the caller may ask
* to block until a set of `jsonpath = value` conditions hold on the live
* object; after a DELETE, until the object is gone. Both are driven by
* `kube::runtime::wait::await_condition` under a tokio timeout, so the wait is
* watch-based rather than a polling loop.
*
* SPDX-License-Identifier: Apache-2.0 */

use kube::api::{Api, DynamicObject};
use kube::runtime::wait::await_condition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_TIMEOUT: &str = "30s";

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_string()
}

/// Conditions that must all hold on the applied object.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct WaitForUpsert {
    pub conditions: Vec<WaitCondition>,
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct WaitCondition {
    /// Dotted path into the object, e.g. `status.conditions[0].status`.
    pub jsonpath: String,
    pub value: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct WaitForDelete {
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for WaitForDelete {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

/// A `WaitForUpsert` with its paths and timeout already parsed.
#[derive(Debug, Clone)]
pub struct CompiledWait {
    pointers: Vec<(String, String)>,
    timeout: Duration,
}

impl WaitForUpsert {
    pub fn compile(&self) -> Result<CompiledWait> {
        let pointers = self
            .conditions
            .iter()
            .map(|c| Ok((json_pointer(&c.jsonpath)?, c.value.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(CompiledWait {
            pointers,
            timeout: parse_duration(&self.timeout)?,
        })
    }
}

impl CompiledWait {
    pub fn is_satisfied(&self, object: &Value) -> bool {
        self.pointers
            .iter()
            .all(|(pointer, expected)| match object.pointer(pointer) {
                Some(Value::String(actual)) => actual == expected,
                Some(Value::Null) | None => false,
                Some(other) => other.to_string() == *expected,
            })
    }
}

/// Parses durations of the form `<n>s`, `<n>m` or `<n>h`. Values whose
/// seconds do not fit in a `u64` are rejected.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    let invalid = || Error::InvalidDuration(s.to_string());
    let (amount, unit_secs) = match s.char_indices().last() {
        Some((pos, 's')) => (&s[..pos], 1u64),
        Some((pos, 'm')) => (&s[..pos], 60),
        Some((pos, 'h')) => (&s[..pos], 3600),
        _ => return Err(invalid()),
    };
    let secs = amount
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit_secs))
        .ok_or_else(invalid)?;
    Ok(Duration::from_secs(secs))
}

/// Converts a dotted path with optional array indices into a JSON pointer.
///
/// `status.conditions[0].type` and `.status.conditions[0].type` both become
/// `/status/conditions/0/type`.
pub fn json_pointer(path: &str) -> Result<String> {
    let invalid = || Error::InvalidJsonPath(path.to_string());
    let trimmed = path.trim().trim_start_matches('$').trim_start_matches('.');
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut pointer = String::new();
    for segment in trimmed.split('.') {
        let (key, mut rest) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };
        if key.is_empty() {
            return Err(invalid());
        }
        pointer.push('/');
        pointer.push_str(&key.replace('~', "~0").replace('/', "~1"));

        while !rest.is_empty() {
            let close = rest.find(']').ok_or_else(invalid)?;
            let idx = rest[1..close].parse::<usize>().map_err(|_| invalid())?;
            pointer.push('/');
            pointer.push_str(&idx.to_string());
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(invalid());
            }
        }
    }
    Ok(pointer)
}

/// Blocks until every condition holds on `name` or the timeout expires.
pub async fn for_upsert(api: &Api<DynamicObject>, name: &str, wait: &CompiledWait) -> Result<()> {
    info!(
        "Waiting up to {:?} for {} condition(s) on '{}'...",
        wait.timeout,
        wait.pointers.len(),
        name
    );
    let check = wait.clone();
    let condition = move |obj: Option<&DynamicObject>| {
        obj.and_then(|o| serde_json::to_value(o).ok())
            .is_some_and(|value| check.is_satisfied(&value))
    };

    tokio::time::timeout(wait.timeout, await_condition(api.clone(), name, condition))
        .await
        .map_err(|_| Error::WaitTimeout {
            name: name.to_string(),
            timeout: wait.timeout,
        })?
        .map_err(|source| Error::Wait {
            name: name.to_string(),
            source,
        })?;
    debug!("Conditions on '{}' satisfied.", name);
    Ok(())
}

/// Blocks until `name` no longer exists or the timeout expires.
pub async fn for_delete(api: &Api<DynamicObject>, name: &str, wait: &WaitForDelete) -> Result<()> {
    let timeout = parse_duration(&wait.timeout)?;
    info!("Waiting up to {:?} for '{}' to be deleted...", timeout, name);
    let gone = |obj: Option<&DynamicObject>| obj.is_none();

    tokio::time::timeout(timeout, await_condition(api.clone(), name, gone))
        .await
        .map_err(|_| Error::WaitTimeout {
            name: name.to_string(),
            timeout,
        })?
        .map_err(|source| Error::Wait {
            name: name.to_string(),
            source,
        })?;
    debug!("'{}' is gone.", name);
    Ok(())
}
