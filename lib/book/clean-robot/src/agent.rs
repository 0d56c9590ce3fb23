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

//! Agents: mobile cleaners and inert dirt.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::grid::{AgentId, Position};
use crate::{Agent, Rng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CleanerAction {
    /// Remove this dirt from the cleaner's own cell.
    Clean(AgentId),

    /// Step to this neighboring cell.
    MoveTo(Position),

    /// Nowhere to go and nothing to clean.
    Wait,
}

/// CellPercept is what a cleaner senses: its own cell, and what it can reach from it. Vision
/// range is one cell, it never knows about dirt anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPercept {
    pub position: Position,

    /// First dirt found on the cleaner's cell, if any.
    pub dirt: Option<AgentId>,

    /// Moore neighborhood of `position`.
    pub neighbors: Vec<Position>,
}

/// Greedy, memoryless cleaner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cleaner {
    pub id: AgentId,
    pub position: Position,
    pub cleaned_count: u64,
    pub move_count: u64,
}

impl Cleaner {
    pub fn new(id: AgentId, position: Position) -> Self {
        Self {
            id,
            position,
            cleaned_count: 0,
            move_count: 0,
        }
    }

    pub fn record_clean(&mut self) {
        self.cleaned_count += 1;
    }

    pub fn record_move(&mut self, position: Position) {
        self.position = position;
        self.move_count += 1;
    }
}

impl Agent for Cleaner {
    type Action = CleanerAction;
    type Percept = CellPercept;

    fn act(&mut self, percept: &Self::Percept, rng: &mut Rng) -> Self::Action {
        if let Some(dirt) = percept.dirt {
            CleanerAction::Clean(dirt)
        } else if let Some(position) = percept.neighbors.choose(rng) {
            CleanerAction::MoveTo(*position)
        } else {
            CleanerAction::Wait
        }
    }
}

/// A piece of dirt. It sits on its cell until a cleaner removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dirt {
    pub id: AgentId,
    pub position: Position,
}

impl Dirt {
    pub fn new(id: AgentId, position: Position) -> Self {
        Self { id, position }
    }
}

/// Any agent in the population. Only cleaners have step behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Cleaner(Cleaner),
    Dirt(Dirt),
}

impl AgentKind {
    pub fn id(&self) -> AgentId {
        match self {
            AgentKind::Cleaner(cleaner) => cleaner.id,
            AgentKind::Dirt(dirt) => dirt.id,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            AgentKind::Cleaner(cleaner) => cleaner.position,
            AgentKind::Dirt(dirt) => dirt.position,
        }
    }

    /// Whether the agent gets scheduled.
    pub fn is_active(&self) -> bool {
        matches!(self, AgentKind::Cleaner(_))
    }

    pub fn is_dirt(&self) -> bool {
        matches!(self, AgentKind::Dirt(_))
    }

    pub fn as_cleaner(&self) -> Option<&Cleaner> {
        match self {
            AgentKind::Cleaner(cleaner) => Some(cleaner),
            AgentKind::Dirt(_) => None,
        }
    }

    pub fn as_cleaner_mut(&mut self) -> Option<&mut Cleaner> {
        match self {
            AgentKind::Cleaner(cleaner) => Some(cleaner),
            AgentKind::Dirt(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng() -> Rng {
        rand_pcg::Pcg64::seed_from_u64(42)
    }

    #[test]
    fn test_cleaner_cleans_when_dirt_on_cell() {
        let mut cleaner = Cleaner::new(AgentId(0), Position::new(1, 1));
        let percept = CellPercept {
            position: Position::new(1, 1),
            dirt: Some(AgentId(5)),
            neighbors: vec![Position::new(0, 0), Position::new(2, 2)],
        };
        assert_eq!(
            cleaner.act(&percept, &mut rng()),
            CleanerAction::Clean(AgentId(5))
        );
    }

    #[test]
    fn test_cleaner_moves_to_a_neighbor_when_cell_is_clean() {
        let mut cleaner = Cleaner::new(AgentId(0), Position::new(1, 1));
        let neighbors = vec![
            Position::new(0, 1),
            Position::new(2, 1),
            Position::new(1, 0),
        ];
        let percept = CellPercept {
            position: Position::new(1, 1),
            dirt: None,
            neighbors: neighbors.clone(),
        };
        let mut rng = rng();
        for _ in 0..50 {
            match cleaner.act(&percept, &mut rng) {
                CleanerAction::MoveTo(position) => assert!(neighbors.contains(&position)),
                action => panic!("unexpected action: {:?}", action),
            }
        }
    }

    #[test]
    fn test_cleaner_picks_every_neighbor_eventually() {
        let mut cleaner = Cleaner::new(AgentId(0), Position::new(0, 0));
        let neighbors = vec![
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ];
        let percept = CellPercept {
            position: Position::new(0, 0),
            dirt: None,
            neighbors: neighbors.clone(),
        };
        let mut rng = rng();
        let chosen: Vec<CleanerAction> = (0..200)
            .map(|_| cleaner.act(&percept, &mut rng))
            .collect();
        for neighbor in neighbors {
            assert!(chosen.contains(&CleanerAction::MoveTo(neighbor)));
        }
    }

    #[test]
    fn test_cleaner_waits_without_neighbors() {
        let mut cleaner = Cleaner::new(AgentId(0), Position::new(0, 0));
        let percept = CellPercept {
            position: Position::new(0, 0),
            dirt: None,
            neighbors: vec![],
        };
        assert_eq!(cleaner.act(&percept, &mut rng()), CleanerAction::Wait);
    }

    #[test]
    fn test_cleaner_counters() {
        let mut cleaner = Cleaner::new(AgentId(2), Position::new(1, 1));
        cleaner.record_clean();
        cleaner.record_move(Position::new(2, 1));
        cleaner.record_move(Position::new(2, 2));
        assert_eq!(cleaner.cleaned_count, 1);
        assert_eq!(cleaner.move_count, 2);
        assert_eq!(cleaner.position, Position::new(2, 2));
    }

    #[test]
    fn test_agent_kind_dispatch() {
        let cleaner = AgentKind::Cleaner(Cleaner::new(AgentId(0), Position::new(1, 1)));
        let dirt = AgentKind::Dirt(Dirt::new(AgentId(1), Position::new(0, 2)));
        assert!(cleaner.is_active());
        assert!(!dirt.is_active());
        assert!(dirt.is_dirt());
        assert_eq!(dirt.id(), AgentId(1));
        assert_eq!(dirt.position(), Position::new(0, 2));
        assert!(cleaner.as_cleaner().is_some());
        assert!(dirt.as_cleaner().is_none());
    }
}
