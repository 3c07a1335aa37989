//! Directional adjacency learning from sample images
//!
//! Every pixel of the sample is paired with each of its in-bounds orthogonal
//! neighbours. Each distinct `(center, neighbor, direction)` triple becomes one
//! [`AdjacencyCondition`] whose occurrence count weights later random choices.

use ndarray::Array2;
use std::collections::HashMap;
use std::fmt;

/// RGB color of a sample pixel or generated cell
pub type Color = [u8; 3];

/// Orthogonal direction from a cell to one of its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Previous column
    Left,
    /// Next column
    Right,
    /// Previous row
    Up,
    /// Next row
    Down,
}

impl Direction {
    /// All directions in scan order
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Direction pointing back at the origin
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Row and column delta as `[d_row, d_col]`
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::Left => [0, -1],
            Self::Right => [0, 1],
            Self::Up => [-1, 0],
            Self::Down => [1, 0],
        }
    }

    /// Step from `position` within a `rows x cols` area
    ///
    /// Returns `None` when the step would leave the area.
    pub fn step(self, position: [usize; 2], rows: usize, cols: usize) -> Option<[usize; 2]> {
        let [d_row, d_col] = self.offset();
        let row = position[0].checked_add_signed(d_row)?;
        let col = position[1].checked_add_signed(d_col)?;
        (row < rows && col < cols).then_some([row, col])
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(name)
    }
}

/// A learned local rule
///
/// Reads as: a cell of `center` color saw `neighbor` color in `direction`,
/// `occurrences` times across the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyCondition {
    /// Color of the cell the rule describes
    pub center: Color,
    /// Color observed next to it
    pub neighbor: Color,
    /// Where the neighbour sits relative to the center
    pub direction: Direction,
    /// Number of times the rule was observed (always at least 1)
    pub occurrences: u32,
}

impl AdjacencyCondition {
    /// Occurrence count as a sampling weight
    pub fn weight(&self) -> f64 {
        f64::from(self.occurrences)
    }
}

type ConditionKey = (Color, Color, Direction);

/// Set of unique adjacency conditions with occurrence counts
///
/// Conditions keep their first-observed order; candidate sets index into
/// that order.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyModel {
    conditions: Vec<AdjacencyCondition>,
    index: HashMap<ConditionKey, usize>,
}

impl AdjacencyModel {
    /// Create a model with no conditions
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn all directional conditions from a sample laid out as `[row, col]`
    pub fn learn(sample: &Array2<Color>) -> Self {
        let (rows, cols) = sample.dim();
        let mut model = Self::new();

        for row in 0..rows {
            for col in 0..cols {
                let Some(&center) = sample.get([row, col]) else {
                    continue;
                };
                for direction in Direction::ALL {
                    let neighbor = direction
                        .step([row, col], rows, cols)
                        .and_then(|pos| sample.get(pos));
                    if let Some(&neighbor) = neighbor {
                        model.record(center, neighbor, direction);
                    }
                }
            }
        }

        tracing::debug!(
            rows,
            cols,
            conditions = model.len(),
            "learned adjacency model"
        );
        model
    }

    /// Record one observation, inserting the rule or bumping its count
    pub fn record(&mut self, center: Color, neighbor: Color, direction: Direction) {
        let key = (center, neighbor, direction);
        if let Some(&existing) = self.index.get(&key) {
            if let Some(condition) = self.conditions.get_mut(existing) {
                condition.occurrences += 1;
            }
            return;
        }

        self.index.insert(key, self.conditions.len());
        self.conditions.push(AdjacencyCondition {
            center,
            neighbor,
            direction,
            occurrences: 1,
        });
    }

    /// Number of distinct conditions
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether no condition was learned
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// All conditions in model order
    pub fn conditions(&self) -> &[AdjacencyCondition] {
        &self.conditions
    }

    /// Condition at `index` in model order
    pub fn get(&self, index: usize) -> Option<&AdjacencyCondition> {
        self.conditions.get(index)
    }

    /// Sampling weight of the condition at `index` (0 when out of range)
    pub fn weight(&self, index: usize) -> f64 {
        self.get(index).map_or(0.0, AdjacencyCondition::weight)
    }

    /// Look up a rule by its identifying triple
    pub fn find(
        &self,
        center: Color,
        neighbor: Color,
        direction: Direction,
    ) -> Option<&AdjacencyCondition> {
        self.index
            .get(&(center, neighbor, direction))
            .and_then(|&i| self.conditions.get(i))
    }

    /// Distinct center colors, sorted
    pub fn palette(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = self.conditions.iter().map(|c| c.center).collect();
        colors.sort_unstable();
        colors.dedup();
        colors
    }

    /// Sum of all occurrence counts
    pub fn total_occurrences(&self) -> u64 {
        self.conditions
            .iter()
            .map(|c| u64::from(c.occurrences))
            .sum()
    }
}
