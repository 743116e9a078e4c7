use crate::echo::echo_registry;
use crate::hot_reload::watch_manifest;
use crate::manifest::load_manifest;
use crate::router::{EmptySegmentPolicy, RouteMatch, Router, SharedRouter, SiblingParamPolicy};
use crate::runtime_config::RouterConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line interface for fluroute
///
/// Explores a route manifest: prints its tree and resolves paths against it
/// with echo handlers standing in for the application's own.
#[derive(Parser, Debug)]
#[command(name = "fluroute")]
#[command(about = "Inspect and exercise route manifests", long_about = None)]
pub struct Cli {
    /// Log at debug level (overrides FLUROUTE_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Drop empty path segments instead of matching them literally
    #[arg(long, global = true, default_value_t = false)]
    pub collapse_empty_segments: bool,

    /// Refuse a second parameter segment under the same parent
    #[arg(long, global = true, default_value_t = false)]
    pub reject_sibling_params: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the route tree built from a manifest
    Tree {
        /// Path to the manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Resolve one or more paths and print one JSON line per path
    Match {
        /// Path to the manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Paths to resolve, e.g. `/user/42?tab=profile`
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Watch a manifest and resolve paths read from stdin, one per line
    Watch {
        /// Path to the manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,
    },
}

impl Cli {
    /// Router configuration from the environment, adjusted by flags
    #[must_use]
    pub fn router_config(&self) -> RouterConfig {
        let mut config = RouterConfig::from_env();
        if self.collapse_empty_segments {
            config.empty_segments = EmptySegmentPolicy::Collapse;
        }
        if self.reject_sibling_params {
            config.sibling_params = SiblingParamPolicy::Reject;
        }
        config
    }
}

/// Parse process arguments and run the selected command against stdin/stdout
///
/// # Errors
///
/// Fails if the manifest cannot be loaded or built, or output cannot be written.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&cli, stdin.lock(), &mut stdout.lock())
}

/// Run a parsed command with explicit input and output
///
/// # Errors
///
/// Same as [`run_cli`].
pub fn run(cli: &Cli, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    let config = cli.router_config();
    match &cli.command {
        Commands::Tree { manifest } => {
            let router = build_router(manifest, config)?;
            router.dump_tree(out)?;
        }
        Commands::Match { manifest, paths } => {
            let router = build_router(manifest, config)?;
            for path in paths {
                writeln!(out, "{}", describe_match(path, &router.match_route(&(), path)))?;
            }
        }
        Commands::Watch { manifest } => {
            let loaded = load_manifest(manifest)?;
            let registry = echo_registry(&loaded);
            let router = Router::from_manifest(&loaded, &registry, config)
                .with_context(|| format!("failed to build router from {}", manifest.display()))?;
            let shared = Arc::new(SharedRouter::new(router));
            let _watcher = watch_manifest(manifest, registry, config, Arc::clone(&shared), |_| {})
                .with_context(|| format!("failed to watch {}", manifest.display()))?;

            for line in input.lines() {
                let line = line?;
                let path = line.trim();
                if path.is_empty() {
                    continue;
                }
                writeln!(out, "{}", describe_match(path, &shared.match_route(&(), path)))?;
                out.flush()?;
            }
        }
    }
    Ok(())
}

fn build_router(manifest: &Path, config: RouterConfig) -> anyhow::Result<Router<(), Value>> {
    let loaded = load_manifest(manifest)?;
    let registry = echo_registry(&loaded);
    Router::from_manifest(&loaded, &registry, config)
        .with_context(|| format!("failed to build router from {}", manifest.display()))
}

/// One-line JSON description of a match outcome
#[must_use]
pub fn describe_match(path: &str, result: &RouteMatch<(), Value>) -> Value {
    match result {
        RouteMatch::Visual(m) => json!({
            "path": path,
            "match_type": result.match_type(),
            "pattern": m.pattern,
            "parameters": m.parameters,
            "transition": m.transition.kind,
            "duration_ms": u64::try_from(m.transition.duration.as_millis()).unwrap_or(u64::MAX),
            "output": m.build(&()),
        }),
        RouteMatch::NonVisual {
            pattern,
            parameters,
        } => json!({
            "path": path,
            "match_type": result.match_type(),
            "pattern": pattern,
            "parameters": parameters,
        }),
        RouteMatch::NoMatch { message } => json!({
            "path": path,
            "match_type": result.match_type(),
            "message": message,
        }),
    }
}
