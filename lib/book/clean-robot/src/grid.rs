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

//! Bounded 2D grid where any number of agents can share a cell.

use serde::{Deserialize, Serialize};

use crate::error::{CleanRobotError, Result};
use crate::HashMap;

/// Cell coordinate. `x` is the column, `y` is the row, both start at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: usize,

    /// Row.
    pub y: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether `other` is one of the 8 Moore neighbors of this position.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy) == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Agent identifier. Cleaners and dirt share one id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub usize);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grid of cells. Each cell holds the ids of the agents on it, in the order they arrived.
///
/// The grid is bounded: it does not wrap around at the edges.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<AgentId>>,
    locations: HashMap<AgentId, Position>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec::new(); width * height],
            locations: HashMap::default(),
        }
    }

    /// Width of the grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    /// Whether the position is inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    fn check_bounds(&self, position: Position) -> Result<()> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(CleanRobotError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn index(&self, position: Position) -> usize {
        position.y * self.width + position.x
    }

    /// Put an agent on a cell.
    pub fn place(&mut self, agent: AgentId, position: Position) -> Result<()> {
        self.check_bounds(position)?;
        if self.locations.contains_key(&agent) {
            return Err(CleanRobotError::AgentAlreadyPlaced(agent));
        }
        let index = self.index(position);
        self.cells[index].push(agent);
        self.locations.insert(agent, position);
        Ok(())
    }

    /// Take an agent off the grid. Returns the cell it was on.
    pub fn remove(&mut self, agent: AgentId) -> Result<Position> {
        let position = self
            .locations
            .remove(&agent)
            .ok_or(CleanRobotError::AgentNotFound(agent))?;
        let index = self.index(position);
        let cell = &mut self.cells[index];
        if let Some(offset) = cell.iter().position(|&id| id == agent) {
            // keep arrival order for the remaining occupants
            cell.remove(offset);
        }
        Ok(position)
    }

    /// Move an agent to another cell. On error the grid is left unchanged.
    pub fn move_agent(&mut self, agent: AgentId, new_position: Position) -> Result<()> {
        self.check_bounds(new_position)?;
        self.remove(agent)?;
        self.place(agent, new_position)
    }

    /// The agents on a cell, in arrival order. Empty if the position is outside the grid.
    pub fn contents_at(&self, position: Position) -> &[AgentId] {
        if !self.contains(position) {
            return &[];
        }
        &self.cells[self.index(position)]
    }

    /// Where an agent is, if it is on the grid.
    pub fn position_of(&self, agent: AgentId) -> Option<Position> {
        self.locations.get(&agent).copied()
    }

    /// Number of agents on the grid.
    pub fn num_agents(&self) -> usize {
        self.locations.len()
    }

    /// The Moore neighborhood of a position: up to 8 surrounding cells, without the center. Cells
    /// on the edge have fewer neighbors since the grid does not wrap. Returned in row-major order.
    pub fn neighbors_of(&self, position: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(8);
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (Some(x), Some(y)) = (
                    position.x.checked_add_signed(dx),
                    position.y.checked_add_signed(dy),
                ) else {
                    continue;
                };
                let neighbor = Position::new(x, y);
                if self.contains(neighbor) {
                    neighbors.push(neighbor);
                }
            }
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_grid_starts_empty() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.num_cells(), 12);
        assert_eq!(grid.num_agents(), 0);
        for y in 0..3 {
            for x in 0..4 {
                assert!(grid.contents_at(Position::new(x, y)).is_empty());
            }
        }
    }

    #[test]
    fn test_place_then_contents() {
        let mut grid = Grid::new(3, 3);
        grid.place(AgentId(0), Position::new(1, 1)).expect("place failed");
        grid.place(AgentId(1), Position::new(1, 1)).expect("place failed");
        assert_eq!(
            grid.contents_at(Position::new(1, 1)),
            &[AgentId(0), AgentId(1)]
        );
        assert_eq!(grid.position_of(AgentId(1)), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_place_out_of_bounds_is_error() {
        let mut grid = Grid::new(3, 2);
        assert_eq!(
            grid.place(AgentId(0), Position::new(0, 2)),
            Err(CleanRobotError::OutOfBounds {
                position: Position::new(0, 2),
                width: 3,
                height: 2,
            })
        );
        assert_eq!(grid.num_agents(), 0);
    }

    #[test]
    fn test_place_twice_is_error() {
        let mut grid = Grid::new(3, 3);
        grid.place(AgentId(7), Position::new(0, 0)).expect("place failed");
        assert_eq!(
            grid.place(AgentId(7), Position::new(2, 2)),
            Err(CleanRobotError::AgentAlreadyPlaced(AgentId(7)))
        );
    }

    #[test]
    fn test_remove_keeps_other_occupants_in_order() {
        let mut grid = Grid::new(2, 2);
        for id in 0..3 {
            grid.place(AgentId(id), Position::new(0, 1)).expect("place failed");
        }
        assert_eq!(grid.remove(AgentId(1)), Ok(Position::new(0, 1)));
        assert_eq!(
            grid.contents_at(Position::new(0, 1)),
            &[AgentId(0), AgentId(2)]
        );
        assert_eq!(grid.position_of(AgentId(1)), None);
    }

    #[test]
    fn test_remove_missing_is_error() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(
            grid.remove(AgentId(3)),
            Err(CleanRobotError::AgentNotFound(AgentId(3)))
        );
    }

    #[test]
    fn test_move_agent() {
        let mut grid = Grid::new(3, 3);
        grid.place(AgentId(0), Position::new(1, 1)).expect("place failed");
        grid.move_agent(AgentId(0), Position::new(2, 0))
            .expect("move failed");
        assert!(grid.contents_at(Position::new(1, 1)).is_empty());
        assert_eq!(grid.contents_at(Position::new(2, 0)), &[AgentId(0)]);
    }

    #[test]
    fn test_failed_move_leaves_grid_unchanged() {
        let mut grid = Grid::new(3, 3);
        grid.place(AgentId(0), Position::new(2, 2)).expect("place failed");
        assert!(grid.move_agent(AgentId(0), Position::new(3, 2)).is_err());
        assert_eq!(grid.position_of(AgentId(0)), Some(Position::new(2, 2)));
        assert_eq!(grid.contents_at(Position::new(2, 2)), &[AgentId(0)]);
    }

    #[test]
    fn test_move_missing_agent_is_error() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(
            grid.move_agent(AgentId(4), Position::new(0, 0)),
            Err(CleanRobotError::AgentNotFound(AgentId(4)))
        );
    }

    #[test]
    fn test_contents_out_of_bounds_is_empty() {
        let grid = Grid::new(3, 3);
        assert!(grid.contents_at(Position::new(10, 0)).is_empty());
    }

    #[test]
    fn test_neighbors_interior_corner_and_edge() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.neighbors_of(Position::new(1, 1)).len(), 8);
        assert_eq!(
            grid.neighbors_of(Position::new(0, 0)),
            vec![
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1)
            ]
        );
        assert_eq!(grid.neighbors_of(Position::new(1, 2)).len(), 5);
        assert!(!grid
            .neighbors_of(Position::new(1, 1))
            .contains(&Position::new(1, 1)));
    }

    #[test]
    fn test_neighbors_single_row() {
        let grid = Grid::new(4, 1);
        assert_eq!(
            grid.neighbors_of(Position::new(0, 0)),
            vec![Position::new(1, 0)]
        );
        assert_eq!(
            grid.neighbors_of(Position::new(2, 0)),
            vec![Position::new(1, 0), Position::new(3, 0)]
        );
    }

    #[test]
    fn test_neighbors_single_cell_is_empty() {
        let grid = Grid::new(1, 1);
        assert!(grid.neighbors_of(Position::new(0, 0)).is_empty());
    }

    proptest! {
        #[test]
        fn test_neighbors_are_adjacent_and_in_bounds(
            width in 1..20usize,
            height in 1..20usize,
            x in 0..20usize,
            y in 0..20usize,
        ) {
            let grid = Grid::new(width, height);
            let center = Position::new(x % width, y % height);
            let neighbors = grid.neighbors_of(center);
            prop_assert!(neighbors.len() <= 8);
            for neighbor in &neighbors {
                prop_assert!(grid.contains(*neighbor));
                prop_assert!(center.is_adjacent(neighbor));
            }

            let expected = (0..height)
                .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
                .filter(|p| center.is_adjacent(p))
                .count();
            prop_assert_eq!(neighbors.len(), expected);
        }
    }
}
