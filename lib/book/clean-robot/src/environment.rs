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

//! The cleaning world: the grid plus everything standing on it.

use serde::{Deserialize, Serialize};

use crate::agent::{AgentKind, CellPercept, Cleaner, CleanerAction, Dirt};
use crate::error::{CleanRobotError, Result};
use crate::grid::{AgentId, Grid, Position};
use crate::{Agent, Environment, HashMap, Rng};

/// What happened when a cleaner acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The cleaner removed this dirt and stayed put.
    Cleaned { dirt: AgentId },

    /// The cleaner stepped to a neighboring cell.
    Moved { from: Position, to: Position },

    /// The cleaner did nothing.
    Waited,
}

/// CleaningEnvironment owns the grid and the agent population. It hands out percepts and applies
/// actions, but keeps no simulation-wide counters; those belong to the caller.
#[derive(Debug, Clone)]
pub struct CleaningEnvironment {
    grid: Grid,
    agents: HashMap<AgentId, AgentKind>,
    cleaner_ids: Vec<AgentId>,
    next_id: usize,
}

impl CleaningEnvironment {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::new(width, height),
            agents: HashMap::default(),
            cleaner_ids: Vec::new(),
            next_id: 0,
        }
    }

    fn add(
        &mut self,
        position: Position,
        make: impl FnOnce(AgentId) -> AgentKind,
    ) -> Result<AgentId> {
        let id = AgentId(self.next_id);
        self.grid.place(id, position)?;
        let agent = make(id);
        if agent.is_active() {
            self.cleaner_ids.push(id);
        }
        self.agents.insert(id, agent);
        self.next_id += 1;
        Ok(id)
    }

    /// Put a new cleaner on the grid. Ids are handed out in creation order.
    pub fn add_cleaner(&mut self, position: Position) -> Result<AgentId> {
        self.add(position, |id| AgentKind::Cleaner(Cleaner::new(id, position)))
    }

    /// Put a new piece of dirt on the grid.
    pub fn add_dirt(&mut self, position: Position) -> Result<AgentId> {
        self.add(position, |id| AgentKind::Dirt(Dirt::new(id, position)))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentKind> {
        self.agents.get(&id)
    }

    fn cleaner(&self, id: AgentId) -> Result<&Cleaner> {
        self.agents
            .get(&id)
            .ok_or(CleanRobotError::AgentNotFound(id))?
            .as_cleaner()
            .ok_or(CleanRobotError::NotACleaner(id))
    }

    fn cleaner_mut(&mut self, id: AgentId) -> Result<&mut Cleaner> {
        self.agents
            .get_mut(&id)
            .ok_or(CleanRobotError::AgentNotFound(id))?
            .as_cleaner_mut()
            .ok_or(CleanRobotError::NotACleaner(id))
    }

    /// Ids of all cleaners, in creation order.
    pub fn cleaner_ids(&self) -> &[AgentId] {
        &self.cleaner_ids
    }

    /// All cleaners, in creation order.
    pub fn cleaners(&self) -> impl Iterator<Item = &Cleaner> + '_ {
        self.cleaner_ids
            .iter()
            .filter_map(|id| self.agents.get(id).and_then(AgentKind::as_cleaner))
    }

    /// Cleaned count of every cleaner, in creation order.
    pub fn cleaned_counts(&self) -> Vec<u64> {
        self.cleaners().map(|cleaner| cleaner.cleaned_count).collect()
    }

    /// Number of dirt agents still on the grid.
    pub fn remaining_dirt(&self) -> usize {
        self.agents.values().filter(|agent| agent.is_dirt()).count()
    }

    /// Cells that still hold dirt, sorted by row then column. A cell shows up once per piece of
    /// dirt on it.
    pub fn dirt_positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .agents
            .values()
            .filter(|agent| agent.is_dirt())
            .map(AgentKind::position)
            .collect();
        positions.sort_unstable_by_key(|p| (p.y, p.x));
        positions
    }

    /// Run one full sense-act cycle for a single cleaner.
    pub fn step_agent(&mut self, id: AgentId, rng: &mut Rng) -> Result<Outcome> {
        let percept = self.percept(id)?;
        let action = self.cleaner_mut(id)?.act(&percept, rng);
        self.execute_action(id, &action)
    }
}

impl Environment for CleaningEnvironment {
    type Action = CleanerAction;
    type Percept = CellPercept;
    type Outcome = Outcome;

    fn percept(&self, agent: AgentId) -> Result<Self::Percept> {
        let position = self.cleaner(agent)?.position;
        let dirt = self
            .grid
            .contents_at(position)
            .iter()
            .copied()
            .find(|other| self.agents.get(other).map_or(false, AgentKind::is_dirt));
        Ok(CellPercept {
            position,
            dirt,
            neighbors: self.grid.neighbors_of(position),
        })
    }

    fn execute_action(&mut self, agent: AgentId, action: &Self::Action) -> Result<Self::Outcome> {
        let from = self.cleaner(agent)?.position;
        match *action {
            CleanerAction::Clean(dirt) => {
                let is_dirt_here = self.agents.get(&dirt).map_or(false, AgentKind::is_dirt)
                    && self.grid.position_of(dirt) == Some(from);
                if !is_dirt_here {
                    return Err(CleanRobotError::AgentNotFound(dirt));
                }
                self.grid.remove(dirt)?;
                self.agents.remove(&dirt);
                self.cleaner_mut(agent)?.record_clean();
                Ok(Outcome::Cleaned { dirt })
            }
            CleanerAction::MoveTo(to) => {
                if !from.is_adjacent(&to) {
                    return Err(CleanRobotError::NotAdjacent { from, to });
                }
                self.grid.move_agent(agent, to)?;
                self.cleaner_mut(agent)?.record_move(to);
                Ok(Outcome::Moved { from, to })
            }
            CleanerAction::Wait => Ok(Outcome::Waited),
        }
    }
}
