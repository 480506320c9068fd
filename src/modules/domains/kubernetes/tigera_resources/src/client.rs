/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/client.rs
*
* Builds the single `kube::Client` a provider instance uses for all of its
* requests.
*
* SPDX-License-Identifier: Apache-2.0 */

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};

/// Initializes a Kubernetes client from the provider configuration.
///
/// An explicit kubeconfig path or context selects that kubeconfig entry;
/// otherwise the configuration is inferred the same way `kubectl` does.
pub async fn initialize_client(config: &ProviderConfig) -> Result<Client> {
    if config.offline {
        return Err(Error::Unconfigured);
    }
    let options = KubeConfigOptions {
        context: config.context.clone(),
        ..KubeConfigOptions::default()
    };

    let kube_config = match (&config.kubeconfig, &config.context) {
        (Some(path), _) => {
            debug!("Loading kubeconfig from '{}'.", path);
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &options).await?
        }
        (None, Some(context)) => {
            debug!("Using kubeconfig context '{}'.", context);
            Config::from_kubeconfig(&options).await?
        }
        (None, None) => Config::infer().await?,
    };
    Ok(Client::try_from(kube_config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
  - name: dev
    cluster:
      server: https://127.0.0.1:6443
      insecure-skip-tls-verify: true
  - name: prod
    cluster:
      server: https://10.0.0.1:6443
      insecure-skip-tls-verify: true
contexts:
  - name: dev
    context: {cluster: dev, user: admin}
  - name: prod
    context: {cluster: prod, user: admin}
current-context: dev
users:
  - name: admin
    user: {token: abc}
"#;

    fn write_kubeconfig() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(KUBECONFIG.as_bytes()).unwrap();
        file
    }

    fn kubeconfig_path(file: &NamedTempFile) -> String {
        file.path().to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_offline_config_has_no_client() {
        let config = ProviderConfig {
            offline: true,
            ..Default::default()
        };
        assert!(matches!(initialize_client(&config).await, Err(Error::Unconfigured)));
    }

    #[tokio::test]
    async fn test_unknown_context_is_a_kubeconfig_error() {
        let file = write_kubeconfig();
        let config = ProviderConfig {
            kubeconfig: Some(kubeconfig_path(&file)),
            context: Some("staging".to_string()),
            ..Default::default()
        };
        let result = initialize_client(&config).await;
        assert!(matches!(result, Err(Error::Kubeconfig(_))));
    }

    #[tokio::test]
    async fn test_missing_kubeconfig_file_is_a_kubeconfig_error() {
        let path = kubeconfig_path(&write_kubeconfig());
        let config = ProviderConfig {
            kubeconfig: Some(path),
            ..Default::default()
        };
        assert!(matches!(initialize_client(&config).await, Err(Error::Kubeconfig(_))));
    }
}
