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

//! Errors for the cleaning simulation.
//!
//! `InvalidConfig` is the only error a correct caller should ever see. The rest mean an
//! invariant of the grid or the simulation was broken, and are surfaced rather than recovered.

use crate::grid::{AgentId, Position};

/// Cleaning simulation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CleanRobotError {
    /// Construction parameters are unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Position lies outside the grid.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Agent is not on the grid, or not in the population.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Agent is already on the grid.
    #[error("agent already placed: {0}")]
    AgentAlreadyPlaced(AgentId),

    /// Agent has no step behavior.
    #[error("agent is not a cleaner: {0}")]
    NotACleaner(AgentId),

    /// A move target is not in the Moore neighborhood of the current position.
    #[error("{to} is not adjacent to {from}")]
    NotAdjacent {
        /// Where the agent is.
        from: Position,
        /// Where it tried to go.
        to: Position,
    },

    /// Number of cleaned counts does not match the number of cleaners.
    #[error("expected {expected} cleaned counts, got {actual}")]
    MetricsLengthMismatch {
        /// Number of cleaners.
        expected: usize,
        /// Length of the counts passed in.
        actual: usize,
    },

    /// `step` was called after the simulation stopped.
    #[error("simulation has already stopped")]
    SimulationStopped,
}

/// Result alias for the cleaning simulation.
pub type Result<T> = std::result::Result<T, CleanRobotError>;
