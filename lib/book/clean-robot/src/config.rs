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

use serde::{Deserialize, Serialize};

use crate::error::{CleanRobotError, Result};
use crate::grid::Position;

/// Every cleaner starts here.
pub const START_POSITION: Position = Position { x: 1, y: 1 };

/// Parameters of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of cleaners.
    pub num_agents: usize,
    pub width: usize,
    pub height: usize,
    /// Share of cells that start dirty, from 0 to 100.
    pub dirty_percentage: f64,
    /// Hard bound on the number of ticks.
    pub max_ticks: u64,
    /// Seed for the random source.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_agents: 10,
            width: 10,
            height: 10,
            dirty_percentage: 100.0,
            max_ticks: 50,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    pub fn new(
        num_agents: usize,
        width: usize,
        height: usize,
        dirty_percentage: f64,
        max_ticks: u64,
    ) -> Self {
        Self {
            num_agents,
            width,
            height,
            dirty_percentage,
            max_ticks,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    /// floor(width * height * dirty_percentage / 100)
    pub fn num_dirty_cells(&self) -> usize {
        (self.num_cells() as f64 * self.dirty_percentage / 100.0).floor() as usize
    }

    /// The fixed spawn cell, pulled back inside the grid when the grid is a single row or
    /// column.
    pub fn start_position(&self) -> Position {
        Position::new(
            START_POSITION.x.min(self.width.saturating_sub(1)),
            START_POSITION.y.min(self.height.saturating_sub(1)),
        )
    }

    /// Check the parameters before any simulation state is built.
    pub fn validate(&self) -> Result<()> {
        if self.num_agents == 0 {
            return Err(invalid("num_agents must be positive"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.num_cells() < 2 {
            return Err(invalid("grid needs at least two cells for cleaners to move"));
        }
        if self.max_ticks == 0 {
            return Err(invalid("max_ticks must be positive"));
        }
        if !self.dirty_percentage.is_finite() || !(0.0..=100.0).contains(&self.dirty_percentage) {
            return Err(invalid(format!(
                "dirty_percentage must be between 0 and 100, got {}",
                self.dirty_percentage
            )));
        }
        if self.num_dirty_cells() > self.num_cells() {
            return Err(invalid(format!(
                "{} dirty cells do not fit in {} cells",
                self.num_dirty_cells(),
                self.num_cells()
            )));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> CleanRobotError {
    CleanRobotError::InvalidConfig(reason.into())
}
