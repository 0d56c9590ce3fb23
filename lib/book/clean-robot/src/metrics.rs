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

//! How evenly the cleaning work is shared out.

use serde::{Deserialize, Serialize};

use crate::error::{CleanRobotError, Result};
use crate::Float;

/// compute_gini is the Gini coefficient of the cleaned counts over `n` cleaners, estimated from the
/// discrete Lorenz curve:
///
/// ```text
/// B = sum(x[i] * (n - i)) / (n * sum(x))     with x sorted ascending
/// G = 1 + 1/n - 2B
/// ```
///
/// 0 means every cleaner did the same amount of work. If nobody has cleaned anything yet the
/// result is also 0, rather than a division by zero.
///
/// `n` has to be the number of cleaners, i.e. `cleaned_counts.len()`.
pub fn compute_gini(cleaned_counts: &[u64], n: usize) -> Result<Float> {
    if n == 0 || cleaned_counts.len() != n {
        return Err(CleanRobotError::MetricsLengthMismatch {
            expected: n,
            actual: cleaned_counts.len(),
        });
    }

    let total: u64 = cleaned_counts.iter().sum();
    if total == 0 {
        return Ok(0.0);
    }

    let mut x = cleaned_counts.to_vec();
    x.sort_unstable();

    let n_float = n as Float;
    let weighted: Float = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| xi as Float * (n - i) as Float)
        .sum();
    let b = weighted / (n_float * total as Float);
    Ok(1.0 + 1.0 / n_float - 2.0 * b)
}

/// One collected data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Tick at which the record was taken, before that tick's agents acted.
    pub tick: u64,
    pub gini: Float,
    pub cleaned_counts: Vec<u64>,
}

/// Collects a Gini coefficient and the per-cleaner cleaned counts once per tick. Kept in memory
/// only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    history: Vec<MetricsRecord>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: u64, cleaned_counts: Vec<u64>) -> Result<&MetricsRecord> {
        let gini = compute_gini(&cleaned_counts, cleaned_counts.len())?;
        self.history.push(MetricsRecord {
            tick,
            gini,
            cleaned_counts,
        });
        let index = self.history.len() - 1;
        Ok(&self.history[index])
    }

    pub fn history(&self) -> &[MetricsRecord] {
        &self.history
    }

    pub fn latest(&self) -> Option<&MetricsRecord> {
        self.history.last()
    }

    pub fn gini_series(&self) -> Vec<Float> {
        self.history.iter().map(|record| record.gini).collect()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
