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

//! Multi-agent cleaning simulation.
//!
//! A number of cleaner agents start on the same cell of a bounded grid that is partially covered in
//! dirt. Every tick each cleaner, in a random order, either sucks up one piece of dirt on its own
//! cell or wanders to a random neighboring cell. The run stops once all the dirt is gone or the
//! tick limit is reached. The distribution of cleaning work across the cleaners is summarized with
//! a Gini coefficient.
//!
//! This is the multi-agent version of the vacuum world from Chapter 2: Intelligent Agents.

pub mod agent;
pub mod config;
pub mod environment;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod scheduler;
pub mod simulation;

pub use agent::{AgentKind, CellPercept, Cleaner, CleanerAction, Dirt};
pub use config::SimulationConfig;
pub use environment::{CleaningEnvironment, Outcome};
pub use error::{CleanRobotError, Result};
pub use grid::{AgentId, Grid, Position};
pub use metrics::{compute_gini, Metrics, MetricsRecord};
pub use scheduler::{permute, RandomActivation};
pub use simulation::{
    CleanerSnapshot, Simulation, SimulationState, Snapshot, StepReport, StopReason,
};

/// Floating point type used for metrics.
pub type Float = f64;

/// Seedable random source. Every random decision in a run comes from one of these, so a fixed
/// seed reproduces a run exactly.
pub type Rng = rand_pcg::Pcg64;

/// Faster hasher than the default SipHash; agent ids are not attacker controlled.
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// An Agent acts in a Performance, Environment, Action, Sensing (PEAS) cycle.
/// For a given Percept, the Agent will return an Action.
///
/// Notice that the Agent is not aware of an Environment, its only interface is the Percept coming
/// in then the Action going out. Agents that choose randomly draw from the supplied `rng` so the
/// whole simulation stays reproducible.
pub trait Agent {
    /// What the agent decides to do.
    type Action;

    /// What the agent senses.
    type Percept;

    /// Choose an action for the given percept.
    fn act(&mut self, percept: &Self::Percept, rng: &mut Rng) -> Self::Action;
}

/// An Environment hosts many agents in a Performance, Environment, Action, Sensing (PEAS) cycle.
///
/// Unlike the single-agent vacuum world, agents are addressed by id, and the environment reports
/// what happened for each executed action so the caller can keep its own counters.
pub trait Environment {
    /// Action an agent can take in this environment.
    type Action;

    /// What an agent senses in this environment.
    type Percept;

    /// Result of executing an action.
    type Outcome;

    /// The percept for a single agent.
    fn percept(&self, agent: AgentId) -> Result<Self::Percept>;

    /// Apply an agent's action to the environment.
    fn execute_action(&mut self, agent: AgentId, action: &Self::Action) -> Result<Self::Outcome>;
}
