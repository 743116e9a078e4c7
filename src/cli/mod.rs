//! # CLI Module
//!
//! Command-line tooling for route manifests.
//!
//! ## Commands
//!
//! ### `tree`
//!
//! Print the route tree a manifest produces:
//!
//! ```bash
//! fluroute tree --manifest routes.yaml
//! ```
//!
//! ### `match`
//!
//! Resolve paths and print one JSON object per path:
//!
//! ```bash
//! fluroute match --manifest routes.yaml /user/42?tab=profile /nope
//! ```
//!
//! ### `watch`
//!
//! Keep the manifest loaded, reload it whenever it changes and resolve paths
//! read from stdin:
//!
//! ```bash
//! fluroute watch --manifest routes.yaml
//! ```
//!
//! Every handler named in the manifest is replaced by an echo handler that
//! renders its own name and the parameters it received.
//!
//! ## Global Flags
//!
//! - `--collapse-empty-segments` - drop empty segments (`/a//b` is `/a/b`)
//! - `--reject-sibling-params` - refuse ambiguous parameter siblings
//! - `-v, --verbose` - debug logging on stderr
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use clap::Parser;
//! use fluroute::cli::{run_cli, Cli};
//!
//! run_cli(Cli::parse())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod commands;


pub use commands::{describe_match, run, run_cli, Cli, Commands};
