/* Copyright (C) 2025 Pedro Henrique / phkaiser13
 * File: k8s/providers/tigera_provider/src/commands.rs
 * Executes the parsed command line. Input problems (unreadable files,
 * malformed YAML, unknown kinds) are reported with `anyhow` context; failures
 * of the provider operations themselves are reported as diagnostics.
 * SPDX-License-Identifier: Apache-2.0 */

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tigera_resources::{
    APIServerSpec, ComplianceSpec, Diagnostics, LogCollectorSpec, LogStorageSpec, ManifestModel,
    OperatorSpec, Provider, ProviderConfig, ResourceKind, ResourceModel,
};
use tracing::info;

use crate::cli::{Cli, Commands, GlobalArgs};

#[derive(Debug)]
pub enum Failure {
    Input(anyhow::Error),
    Diagnostics(Diagnostics),
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Failure::Input(err)
    }
}

impl From<Diagnostics> for Failure {
    fn from(diags: Diagnostics) -> Self {
        Failure::Diagnostics(diags)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Input(err) => write!(f, "Error: {:#}", err),
            Failure::Diagnostics(diags) => write!(f, "{}", diags),
        }
    }
}

/// A provider operation on one model.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Validate,
    Manifest,
    Apply,
    Read,
    Delete,
    Import(String),
}

/// Runs the command and returns what should be printed on stdout.
pub async fn run(cli: Cli) -> Result<Option<String>, Failure> {
    let config = load_config(&cli.global)?;

    let (action, kind, content) = match cli.command {
        Commands::Types => return Ok(Some(type_listing())),
        Commands::Import(args) => (Action::Import(args.id), args.kind, String::new()),
        Commands::Validate(args) => model_input(Action::Validate, &args.file, args.kind)?,
        Commands::Manifest(args) => model_input(Action::Manifest, &args.file, args.kind)?,
        Commands::Apply(args) => model_input(Action::Apply, &args.file, args.kind)?,
        Commands::Read(args) => model_input(Action::Read, &args.file, args.kind)?,
        Commands::Delete(args) => model_input(Action::Delete, &args.file, args.kind)?,
    };

    match kind {
        ResourceKind::APIServer => execute::<APIServerSpec>(action, config, &content).await,
        ResourceKind::Compliance => execute::<ComplianceSpec>(action, config, &content).await,
        ResourceKind::LogCollector => execute::<LogCollectorSpec>(action, config, &content).await,
        ResourceKind::LogStorage => execute::<LogStorageSpec>(action, config, &content).await,
    }
}

/// Configuration file, then `TIGERA_PROVIDER_*` variables, then flags.
pub fn load_config(global: &GlobalArgs) -> anyhow::Result<ProviderConfig> {
    let config = match &global.config {
        Some(path) => ProviderConfig::from_file(path)
            .with_context(|| format!("Failed to load provider configuration from {}", path.display()))?,
        None => ProviderConfig::default(),
    };
    let mut config = config
        .with_env()
        .context("Invalid provider configuration in environment")?;

    if let Some(kubeconfig) = &global.kubeconfig {
        config.kubeconfig = Some(kubeconfig.clone());
    }
    if let Some(context) = &global.context {
        config.context = Some(context.clone());
    }
    if let Some(manager) = &global.field_manager {
        config.field_manager = manager.clone();
    }
    if let Some(force) = global.force_conflicts {
        config.force_conflicts = force;
    }
    Ok(config)
}

fn type_listing() -> String {
    let mut out = String::new();
    for name in Provider::resource_types() {
        out.push_str(&format!("resource    {}\n", name));
    }
    for name in Provider::data_source_types() {
        out.push_str(&format!("data_source {}\n", name));
    }
    out
}

fn model_input(
    action: Action,
    path: &Path,
    kind: Option<ResourceKind>,
) -> anyhow::Result<(Action, ResourceKind, String)> {
    let content = read_input(path)?;
    let kind = detect_kind(&content, kind)
        .with_context(|| format!("Cannot determine the kind of {}", path.display()))?;
    Ok((action, kind, content))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read model from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Uses `explicit` when given, otherwise the `kind` field of the document.
/// Both must agree when both are present.
fn detect_kind(content: &str, explicit: Option<ResourceKind>) -> anyhow::Result<ResourceKind> {
    let document: serde_yaml::Value =
        serde_yaml::from_str(content).context("Model is not valid YAML or JSON")?;
    let declared = match document.get("kind").and_then(serde_yaml::Value::as_str) {
        Some(kind) => Some(kind.parse::<ResourceKind>().map_err(|e| anyhow!(e))?),
        None => None,
    };

    match (explicit, declared) {
        (Some(explicit), Some(declared)) if explicit != declared => {
            bail!("--kind {} does not match kind {} in the model", explicit, declared)
        }
        (Some(kind), _) | (None, Some(kind)) => Ok(kind),
        (None, None) => bail!("the model has no 'kind' field; pass --kind"),
    }
}

fn to_yaml<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_yaml::to_string(value).context("Failed to render state as YAML")
}

async fn execute<S: OperatorSpec>(
    action: Action,
    config: ProviderConfig,
    content: &str,
) -> Result<Option<String>, Failure> {
    match action {
        Action::Validate => {
            let model = ResourceModel::<S>::from_yaml(content).map_err(Diagnostics::from)?;
            Provider::offline(config).validate(&model)?;
            info!("{} '{}' is valid.", S::KIND, model.name());
            Ok(None)
        }
        Action::Manifest => {
            let model = ManifestModel::<S>::from_yaml(content).map_err(Diagnostics::from)?;
            let rendered = Provider::offline(config).manifest(model)?;
            Ok(rendered.yaml)
        }
        Action::Apply => {
            let model = ResourceModel::<S>::from_yaml(content).map_err(Diagnostics::from)?;
            let provider = Provider::configure(config).await?;
            let state = provider.create(model).await?;
            Ok(Some(to_yaml(&state)?))
        }
        Action::Read => {
            let model = ResourceModel::<S>::from_yaml(content).map_err(Diagnostics::from)?;
            let provider = Provider::configure(config).await?;
            let state = provider.read(model).await?;
            Ok(Some(to_yaml(&state)?))
        }
        Action::Delete => {
            let model = ResourceModel::<S>::from_yaml(content).map_err(Diagnostics::from)?;
            let provider = Provider::configure(config).await?;
            provider.delete(&model).await?;
            Ok(None)
        }
        Action::Import(id) => {
            let provider = Provider::configure(config).await?;
            let model = provider.import_state::<S>(&id)?;
            let state = provider.read(model).await?;
            Ok(Some(to_yaml(&state)?))
        }
    }
}
