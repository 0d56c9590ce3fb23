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

//! Random activation: every tick each scheduled agent acts exactly once, in a freshly shuffled
//! order.

use rand::seq::SliceRandom;

use crate::grid::AgentId;
use crate::Rng;

/// Uniformly random permutation of `ids`. The input is left alone.
pub fn permute(ids: &[AgentId], rng: &mut Rng) -> Vec<AgentId> {
    let mut order = ids.to_vec();
    order.shuffle(rng);
    order
}

/// RandomActivation holds the agents that have step behavior. Membership is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomActivation {
    ids: Vec<AgentId>,
    steps: u64,
}

impl RandomActivation {
    pub fn new(ids: Vec<AgentId>) -> Self {
        Self { ids, steps: 0 }
    }

    pub fn ids(&self) -> &[AgentId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of completed `activate_all` passes.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Activate every agent once in a new random order. `step` gets the agent id and the same
    /// random source, so agents can make their own random choices. Stops at the first error, in
    /// which case the pass does not count as a completed step.
    pub fn activate_all<E, F>(&mut self, rng: &mut Rng, mut step: F) -> Result<(), E>
    where
        F: FnMut(AgentId, &mut Rng) -> Result<(), E>,
    {
        let order = permute(&self.ids, rng);
        for id in order {
            step(id, rng)?;
        }
        self.steps += 1;
        Ok(())
    }
}
