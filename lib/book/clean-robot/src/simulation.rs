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

//! The simulation controller: builds the world, advances it one tick at a time, decides when to
//! stop, and hands out read-only snapshots.

use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::agent::Cleaner;
use crate::config::SimulationConfig;
use crate::environment::{CleaningEnvironment, Outcome};
use crate::error::{CleanRobotError, Result};
use crate::grid::{AgentId, Grid, Position};
use crate::metrics::{compute_gini, Metrics};
use crate::scheduler::RandomActivation;
use crate::{Float, Rng};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopReason {
    /// Every piece of dirt placed at the start has been removed.
    AllClean,

    /// `max_ticks` ticks have been run.
    TickLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::AllClean => write!(f, "all clean"),
            StopReason::TickLimit => write!(f, "tick limit"),
        }
    }
}

/// Counters owned by the controller. Everything except the tick counters, the totals and the
/// running flag is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub num_agents: usize,
    pub dirty_percentage: f64,
    pub max_ticks: u64,
    pub num_dirty_cells: u64,
    pub tick_count: u64,
    pub total_cleaned: u64,
    pub total_moves: u64,
    pub cleaned_percentage: Float,
    pub running: bool,
    pub stop_reason: Option<StopReason>,
}

/// What happened during a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub tick: u64,
    pub cleaned: u64,
    pub moves: u64,
    pub stop_reason: Option<StopReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanerSnapshot {
    pub id: AgentId,
    pub position: Position,
    pub cleaned_count: u64,
    pub move_count: u64,
}

impl From<&Cleaner> for CleanerSnapshot {
    fn from(cleaner: &Cleaner) -> Self {
        Self {
            id: cleaner.id,
            position: cleaner.position,
            cleaned_count: cleaner.cleaned_count,
            move_count: cleaner.move_count,
        }
    }
}

/// Read-only view of a simulation, for anything that wants to display or check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick_count: u64,
    pub running: bool,
    pub stop_reason: Option<StopReason>,
    pub total_cleaned: u64,
    pub total_moves: u64,
    pub cleaned_percentage: Float,
    pub num_dirty_cells: u64,
    pub remaining_dirt: usize,
    /// Gini coefficient of the current cleaned counts.
    pub gini: Float,
    /// Cleaners in id order.
    pub cleaners: Vec<CleanerSnapshot>,
    /// Cells that still hold dirt.
    pub dirt: Vec<Position>,
}

impl Snapshot {
    pub fn cleaned_counts(&self) -> Vec<u64> {
        self.cleaners.iter().map(|c| c.cleaned_count).collect()
    }
}

/// Simulation owns the world, the schedule, the collected metrics and the random source. It is a
/// plain state machine: nothing happens until `step` is called.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    state: SimulationState,
    environment: CleaningEnvironment,
    scheduler: RandomActivation,
    metrics: Metrics,
    rng: Rng,
}

impl Simulation {
    /// Build a simulation with a random source seeded from `config.seed`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let rng = rand_pcg::Pcg64::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Build a simulation that draws from `rng`. Invalid parameters are rejected before anything
    /// is created.
    ///
    /// All cleaners start on the same cell. Dirt goes on `num_dirty_cells` distinct cells picked
    /// uniformly at random.
    pub fn with_rng(config: SimulationConfig, mut rng: Rng) -> Result<Self> {
        config.validate()?;

        let mut environment = CleaningEnvironment::new(config.width, config.height);
        let start = config.start_position();
        for _ in 0..config.num_agents {
            environment.add_cleaner(start)?;
        }

        let num_dirty_cells = config.num_dirty_cells();
        // cells are enumerated column by column
        for index in rand::seq::index::sample(&mut rng, config.num_cells(), num_dirty_cells) {
            let position = Position::new(index / config.height, index % config.height);
            environment.add_dirt(position)?;
        }

        let scheduler = RandomActivation::new(environment.cleaner_ids().to_vec());
        let state = SimulationState {
            num_agents: config.num_agents,
            dirty_percentage: config.dirty_percentage,
            max_ticks: config.max_ticks,
            num_dirty_cells: num_dirty_cells as u64,
            tick_count: 0,
            total_cleaned: 0,
            total_moves: 0,
            cleaned_percentage: 0.0,
            running: true,
            stop_reason: None,
        };

        info!(
            num_agents = config.num_agents,
            width = config.width,
            height = config.height,
            num_dirty_cells,
            max_ticks = config.max_ticks,
            seed = config.seed,
            "initialized cleaning simulation"
        );

        Ok(Self {
            config,
            state,
            environment,
            scheduler,
            metrics: Metrics::new(),
            rng,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn grid(&self) -> &Grid {
        self.environment.grid()
    }

    pub fn environment(&self) -> &CleaningEnvironment {
        &self.environment
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Advance one tick.
    ///
    /// Metrics are collected first, so the record for a tick shows the counts from before that
    /// tick's cleaners acted. Then every cleaner acts once in random order, the tick counter
    /// moves on and the stopping conditions are checked.
    ///
    /// Returns `SimulationStopped`, without touching any state, once the run is over.
    pub fn step(&mut self) -> Result<StepReport> {
        if !self.state.running {
            return Err(CleanRobotError::SimulationStopped);
        }

        self.metrics
            .record(self.state.tick_count, self.environment.cleaned_counts())?;

        let tick = self.state.tick_count;
        let mut cleaned = 0;
        let mut moves = 0;
        let environment = &mut self.environment;
        let state = &mut self.state;
        self.scheduler
            .activate_all(&mut self.rng, |id, rng| -> Result<()> {
                match environment.step_agent(id, rng)? {
                    Outcome::Cleaned { dirt } => {
                        debug!(tick, cleaner = %id, dirt = %dirt, "cleaned");
                        state.total_cleaned += 1;
                        cleaned += 1;
                    }
                    Outcome::Moved { .. } => {
                        state.total_moves += 1;
                        moves += 1;
                    }
                    Outcome::Waited => {
                        warn!(tick, cleaner = %id, "cleaner has no neighboring cell");
                    }
                }
                Ok(())
            })?;

        self.state.tick_count = self.scheduler.steps();
        self.state.cleaned_percentage =
            self.state.total_cleaned as Float / self.config.num_cells() as Float * 100.0;

        let stop_reason = if self.state.total_cleaned == self.state.num_dirty_cells {
            Some(StopReason::AllClean)
        } else if self.state.tick_count >= self.state.max_ticks {
            Some(StopReason::TickLimit)
        } else {
            None
        };

        debug!(
            tick = self.state.tick_count,
            cleaned,
            moves,
            total_cleaned = self.state.total_cleaned,
            "tick finished"
        );

        if let Some(reason) = stop_reason {
            self.state.running = false;
            self.state.stop_reason = Some(reason);
            info!(
                ticks = self.state.tick_count,
                cleaned_percentage = self.state.cleaned_percentage,
                total_moves = self.state.total_moves,
                %reason,
                "simulation stopped"
            );
        }

        Ok(StepReport {
            tick: self.state.tick_count,
            cleaned,
            moves,
            stop_reason,
        })
    }

    /// Step until the run stops, then return the final snapshot.
    pub fn run(&mut self) -> Result<Snapshot> {
        while self.state.running {
            self.step()?;
        }
        Ok(self.snapshot())
    }

    /// Current view of the simulation. Has no side effects.
    pub fn snapshot(&self) -> Snapshot {
        let cleaners: Vec<CleanerSnapshot> =
            self.environment.cleaners().map(CleanerSnapshot::from).collect();
        let counts: Vec<u64> = cleaners.iter().map(|c| c.cleaned_count).collect();
        // there is always at least one cleaner, so this cannot fail
        let gini = compute_gini(&counts, counts.len()).unwrap_or(0.0);

        Snapshot {
            tick_count: self.state.tick_count,
            running: self.state.running,
            stop_reason: self.state.stop_reason,
            total_cleaned: self.state.total_cleaned,
            total_moves: self.state.total_moves,
            cleaned_percentage: self.state.cleaned_percentage,
            num_dirty_cells: self.state.num_dirty_cells,
            remaining_dirt: self.environment.remaining_dirt(),
            gini,
            cleaners,
            dirt: self.environment.dirt_positions(),
        }
    }
}
