//! Generation state of a single grid position

use crate::algorithm::bitset::CandidateSet;
use crate::analysis::adjacency::{AdjacencyModel, Color};
use crate::io::configuration::COLLAPSED_ENTROPY;
use crate::math::entropy::shannon_entropy;

/// State of one grid position
///
/// An uncollapsed cell holds the conditions still consistent with its
/// neighbours; a collapsed cell holds only its resolved color. Candidates
/// are only ever narrowed until the grid is reset.
#[derive(Debug, Clone)]
pub struct Cell {
    collapsed: bool,
    entropy: f64,
    color: Option<Color>,
    candidates: CandidateSet,
}

impl Cell {
    /// Create an uncollapsed cell with every condition of `model` as candidate
    pub fn new(model: &AdjacencyModel) -> Self {
        let candidates = CandidateSet::all(model.len());
        let entropy = Self::entropy_of(&candidates, model);
        Self {
            collapsed: false,
            entropy,
            color: None,
            candidates,
        }
    }

    /// Entropy of a candidate set under the model's occurrence weights
    pub fn entropy_of(candidates: &CandidateSet, model: &AdjacencyModel) -> f64 {
        shannon_entropy(candidates.iter().map(|i| model.weight(i)))
    }

    /// Whether the cell has been resolved
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Current entropy; the collapsed sentinel once resolved
    pub const fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Resolved color, `None` before collapse
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    /// Remaining candidate conditions
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Number of remaining candidates
    pub fn candidate_count(&self) -> usize {
        self.candidates.count()
    }

    /// Uncollapsed with at least one candidate
    pub fn is_selectable(&self) -> bool {
        !self.collapsed && !self.candidates.is_empty()
    }

    /// Replace the candidates with a narrower set and refresh entropy
    pub fn narrow(&mut self, candidates: CandidateSet, model: &AdjacencyModel) {
        self.entropy = Self::entropy_of(&candidates, model);
        self.candidates = candidates;
    }

    /// Mark the cell resolved to `color`
    pub fn resolve(&mut self, color: Color) {
        self.color = Some(color);
        self.collapsed = true;
        self.candidates.clear();
        self.entropy = COLLAPSED_ENTROPY;
    }
}
