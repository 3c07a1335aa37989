//! Weighted resolution of a single cell to a concrete color

use crate::analysis::adjacency::{AdjacencyModel, Color};
use crate::io::error::{Result, invalid_operation};
use crate::spatial::{Grid, Position};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick an index with probability proportional to its weight
    ///
    /// Returns `None` for an empty slice or when no weight is positive.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let distribution = WeightedIndex::new(weights).ok()?;
        Some(distribution.sample(&mut self.rng))
    }

    /// Uniform index in `0..len`, `None` when `len` is zero
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }
}

/// Resolve the cell at `position` to the center color of one candidate
///
/// The candidate is drawn by occurrence weight. The cell ends collapsed with
/// no candidates and the terminal entropy. Neighbours are not touched; see
/// [`crate::algorithm::propagation::propagate`].
///
/// # Errors
///
/// Returns [`crate::AlgorithmError::InvalidOperation`] if the position is
/// outside the grid, the cell is already collapsed, or it has no candidates
pub fn collapse_cell(
    grid: &mut Grid,
    model: &AdjacencyModel,
    position: Position,
    selector: &mut RandomSelector,
) -> Result<Color> {
    let cell = grid
        .get_mut(position)
        .ok_or_else(|| invalid_operation("collapse", Some(position), &"position outside grid"))?;

    if cell.is_collapsed() {
        return Err(invalid_operation(
            "collapse",
            Some(position),
            &"cell is already collapsed",
        ));
    }

    let candidates = cell.candidates().to_vec();
    let weights: Vec<f64> = candidates.iter().map(|&i| model.weight(i)).collect();

    let chosen = selector
        .weighted_choice(&weights)
        .and_then(|i| candidates.get(i))
        .and_then(|&i| model.get(i))
        .ok_or_else(|| {
            invalid_operation("collapse", Some(position), &"cell has no candidates left")
        })?;

    cell.resolve(chosen.center);
    Ok(chosen.center)
}
