use crate::{
    algorithm::collapse::{RandomSelector, collapse_cell},
    analysis::adjacency::AdjacencyModel,
    io::error::{AlgorithmError, Result, WithContext, invalid_operation},
    spatial::{Grid, Position},
};
use std::collections::VecDeque;

/// FIFO of collapsed positions whose neighbours still need narrowing
#[derive(Debug, Default)]
pub struct PropagationQueue {
    queue: VecDeque<Position>,
}

impl PropagationQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a freshly collapsed position
    pub fn push(&mut self, position: Position) {
        self.queue.push_back(position);
    }

    /// Next position to propagate from
    pub fn take_next(&mut self) -> Option<Position> {
        self.queue.pop_front()
    }

    /// Number of positions still waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the cascade has drained
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Outcome of one propagation cascade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Cells collapsed by the cascade, origin first, in collapse order
    pub collapsed: Vec<Position>,
    /// Neighbour updates that removed candidates or forced a collapse
    pub narrowed: usize,
}

impl PropagationReport {
    /// Collapses forced by propagation, excluding the origin
    pub fn forced(&self) -> usize {
        self.collapsed.len().saturating_sub(1)
    }
}

/// Result of narrowing one neighbour
enum Narrowing {
    Unchanged,
    Narrowed,
    Forced,
}

/// Propagate the collapse at `origin` through the grid
///
/// Each uncollapsed neighbour drops the candidates that expect a different
/// color on the side facing the collapsed cell. A neighbour left with a
/// single candidate is collapsed on the spot and queued to propagate in
/// turn, so the cascade can reach well beyond the origin's neighbourhood.
/// Candidate sets only shrink, which bounds the cascade.
///
/// # Errors
///
/// Returns [`AlgorithmError::Contradiction`] naming the first cell whose
/// candidates run out; the cell is left with an empty set and the cascade
/// stops there. Returns [`AlgorithmError::InvalidOperation`] if `origin` is
/// not a collapsed cell.
pub fn propagate(
    grid: &mut Grid,
    model: &AdjacencyModel,
    origin: Position,
    selector: &mut RandomSelector,
) -> Result<PropagationReport> {
    let origin_collapsed = grid.get(origin).is_some_and(|c| c.is_collapsed());
    if !origin_collapsed {
        return Err(invalid_operation(
            "propagate",
            Some(origin),
            &"propagation must start from a collapsed cell",
        ));
    }

    let mut report = PropagationReport {
        collapsed: vec![origin],
        narrowed: 0,
    };
    let mut queue = PropagationQueue::new();
    queue.push(origin);

    while let Some(source) = queue.take_next() {
        let Some(color) = grid.get(source).and_then(|c| c.color()) else {
            continue;
        };

        let neighbors: Vec<_> = grid.neighbors(source).collect();
        for (direction, target) in neighbors {
            let Some(cell) = grid.get_mut(target) else {
                continue;
            };
            if cell.is_collapsed() {
                continue;
            }

            // From the target's side the source sits in the opposite direction
            let facing = direction.opposite();
            let retained = cell.candidates().filtered(|index| {
                model
                    .get(index)
                    .is_some_and(|c| c.direction != facing || c.neighbor == color)
            });

            tracing::trace!(
                row = target[0],
                col = target[1],
                from = %facing,
                candidates = %retained,
                "narrowed neighbour"
            );

            let outcome = if retained.is_empty() {
                cell.narrow(retained, model);
                tracing::warn!(
                    row = target[0],
                    col = target[1],
                    conflict = %facing,
                    "contradiction"
                );
                return Err(AlgorithmError::Contradiction {
                    position: target,
                    step: 0,
                });
            } else if retained.count() == 1 {
                cell.narrow(retained, model);
                Narrowing::Forced
            } else if retained.count() < cell.candidate_count() {
                cell.narrow(retained, model);
                Narrowing::Narrowed
            } else {
                Narrowing::Unchanged
            };

            match outcome {
                Narrowing::Forced => {
                    collapse_cell(grid, model, target, selector)
                        .with_operation("forced collapse")?;
                    report.narrowed += 1;
                    report.collapsed.push(target);
                    queue.push(target);
                }
                Narrowing::Narrowed => report.narrowed += 1,
                Narrowing::Unchanged => {}
            }
        }
    }

    if report.forced() > 0 {
        tracing::debug!(
            row = origin[0],
            col = origin[1],
            forced = report.forced(),
            narrowed = report.narrowed,
            "propagation cascade"
        );
    }

    Ok(report)
}
