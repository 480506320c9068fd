/* Copyright (C) 2025 Pedro Henrique / phkaiser13
 * File: k8s/providers/tigera_provider/src/cli.rs
 * Command-line surface of `tigera_provider`. Global flags override the
 * provider configuration file and the `TIGERA_PROVIDER_*` environment; each
 * subcommand maps to one provider operation.
 * SPDX-License-Identifier: Apache-2.0 */

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tigera_resources::ResourceKind;
use tracing_layer::LogFormat;

/// Manage operator.tigera.io/v1 resources with server-side apply.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Provider configuration file (YAML or JSON).
    #[arg(long, global = true, env = "TIGERA_PROVIDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to a kubeconfig file.
    #[arg(long, global = true)]
    pub kubeconfig: Option<String>,

    /// Kubeconfig context to use.
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Field manager for server-side apply.
    #[arg(long, global = true)]
    pub field_manager: Option<String>,

    /// Take ownership of fields managed by someone else. `--force-conflicts=false`
    /// turns it off when the configuration file or environment enables it.
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub force_conflicts: Option<bool>,

    #[arg(long, global = true, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the resource types and data sources served by the provider.
    Types,

    /// Check a model file without contacting the cluster.
    Validate(ModelArgs),

    /// Render a model file as a Kubernetes manifest.
    Manifest(ModelArgs),

    /// Create or update the resource described by a model file.
    Apply(ModelArgs),

    /// Print the live state of the resource described by a model file.
    Read(ModelArgs),

    /// Delete the resource described by a model file.
    Delete(ModelArgs),

    /// Import an existing resource by name and print its state.
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Model file (YAML or JSON); `-` reads from stdin.
    #[arg(long, short)]
    pub file: PathBuf,

    /// Kind of the resource. Defaults to the `kind` field of the file.
    #[arg(long, short)]
    pub kind: Option<ResourceKind>,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Kind name, type suffix or full type name, e.g. `LogStorage`.
    #[arg(long, short)]
    pub kind: ResourceKind,

    /// Import identifier: the resource name.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "tigera_provider",
            "apply",
            "-f",
            "apiserver.yaml",
            "--field-manager",
            "ci",
            "--force-conflicts",
        ]);
        assert_eq!(cli.global.field_manager.as_deref(), Some("ci"));
        assert_eq!(cli.global.force_conflicts, Some(true));
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.file, PathBuf::from("apiserver.yaml"));
                assert_eq!(args.kind, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_force_conflicts_takes_an_optional_value() {
        let parse = |args: &[&str]| {
            let mut argv = vec!["tigera_provider"];
            argv.extend_from_slice(args);
            argv.push("types");
            Cli::try_parse_from(argv).map(|cli| cli.global.force_conflicts)
        };
        assert_eq!(parse(&[]).unwrap(), None);
        assert_eq!(parse(&["--force-conflicts"]).unwrap(), Some(true));
        assert_eq!(parse(&["--force-conflicts=true"]).unwrap(), Some(true));
        assert_eq!(parse(&["--force-conflicts=false"]).unwrap(), Some(false));
        assert!(parse(&["--force-conflicts=maybe"]).is_err());
    }

    #[test]
    fn test_import_kind_accepts_type_names() {
        let cli = Cli::parse_from([
            "tigera_provider",
            "import",
            "--kind",
            "k8s_operator_tigera_io_log_storage_v1",
            "tigera-secure",
        ]);
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.kind, ResourceKind::LogStorage);
                assert_eq!(args.id, "tigera-secure");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["tigera_provider", "import", "--kind", "Installation", "x"]).is_err());
    }
}
