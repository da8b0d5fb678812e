//! Headless webshell host.
//!
//! Replays a JSON scenario of content-surface events and user actions
//! through the shell and logs the resulting view state after every step.
//!
//! Usage:
//!   webshell-app <scenario.json> [config.toml]
//!
//! `RUST_LOG=debug` shows every coordinator transition.

mod scenario;
mod surface;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use scenario::{Runner, Scenario};
use surface::SimulatedSurface;
use webshell_core::{Scheduler, Shell};
use webshell_types::config::ShellConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let scenario_path = args
        .next()
        .map(PathBuf::from)
        .context("usage: webshell-app <scenario.json> [config.toml]")?;
    let config = match args.next() {
        Some(path) => ShellConfig::load(Path::new(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => ShellConfig::default(),
    };
    log::info!(
        "Starting webshell (start page {}, watchdog {} ms)",
        config.start_url,
        config.watchdog_timeout_ms
    );

    let scenario = Scenario::load(&scenario_path)
        .with_context(|| format!("loading scenario {}", scenario_path.display()))?;

    let shell = Shell::new(SimulatedSurface::new(), Scheduler::new(), config);
    let summary = Runner::new(&shell).run(&scenario)?;
    let visible = shell.with_surface(SimulatedSurface::is_visible);
    drop(shell);

    log::info!(
        "Scenario finished: {} steps, {} notices, surface visible at end: {:?}",
        summary.steps,
        summary.notices.len(),
        visible
    );
    if summary.exit_requested {
        log::info!("Host exit was requested by an unhandled back press");
    }
    Ok(())
}
