// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod process;
pub mod registry;
pub mod server;
pub mod types;

use actix_web::web;
use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::config::loader::load_or_default;
use crate::engine::Agent;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (plus `--port` override)
/// - the agent (registry, collector, executor, terminator)
/// - the HTTP server
///
/// The server handles Ctrl-C itself; once it returns, the collector is shut
/// down.
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_or_default(args.config.as_deref())?;
    if let Some(port) = args.port {
        cfg.server.port = port;
    }

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let agent = web::Data::new(Agent::start(cfg.agent_settings()));
    server::serve(agent.clone(), &cfg.server.bind, cfg.server.port).await?;
    agent.shutdown().await;

    Ok(())
}

/// Simple dry-run output: print the effective settings.
fn print_dry_run(cfg: &ConfigFile) {
    println!("execagent dry-run");
    println!("  server.bind = {}", cfg.server.bind);
    println!("  server.port = {}", cfg.server.port);
    println!("  exec.timeout_secs = {}", cfg.exec.timeout_secs);
    println!("  exec.channel_capacity = {}", cfg.exec.channel_capacity);
    println!(
        "  exec.sync_poll_interval_ms = {}",
        cfg.exec.sync_poll_interval_ms
    );
    println!("  stop.timeout_secs = {}", cfg.stop.timeout_secs);

    debug!("dry-run complete (server not started)");
}
