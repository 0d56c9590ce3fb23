/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Run the multi-agent cleaning simulation from the command line.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clean_robot::{Simulation, SimulationConfig, Snapshot};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "clean-robot-run",
    about = "Cleaner agents remove dirt from a grid until it is clean or time runs out"
)]
struct Cli {
    /// Path to a JSON config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of cleaners.
    #[arg(long)]
    agents: Option<usize>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Share of cells that start dirty, 0 to 100.
    #[arg(long)]
    dirty_percentage: Option<f64>,

    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Print the final snapshot as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Print the default config as JSON and exit.
    #[arg(long)]
    dump_default_config: bool,
}

impl Cli {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };
        if let Some(agents) = self.agents {
            config.num_agents = agents;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(dirty_percentage) = self.dirty_percentage {
            config.dirty_percentage = dirty_percentage;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn summary(snapshot: &Snapshot, gini_series: &[f64]) -> String {
    let mut s = String::new();
    s.push_str(&format!("total ticks: {}\n", snapshot.tick_count));
    s.push_str(&format!(
        "cleaned cells: {:.2}%\n",
        snapshot.cleaned_percentage
    ));
    s.push_str(&format!("total moves: {}\n", snapshot.total_moves));
    if let Some(reason) = snapshot.stop_reason {
        s.push_str(&format!("stopped: {}\n", reason));
    }
    s.push_str(&format!("gini: {:.4}\n", snapshot.gini));
    let series: Vec<String> = gini_series.iter().map(|g| format!("{:.3}", g)).collect();
    s.push_str(&format!("gini per tick: [{}]", series.join(", ")));
    s
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if cli.dump_default_config {
        println!(
            "{}",
            serde_json::to_string_pretty(&SimulationConfig::default())?
        );
        return Ok(());
    }

    let config = cli.simulation_config()?;
    let mut simulation = Simulation::new(config).context("failed to build simulation")?;
    let snapshot = simulation.run().context("simulation failed")?;
    info!(ticks = snapshot.tick_count, "done");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", summary(&snapshot, &simulation.metrics().gini_series()));
    }
    Ok(())
}
