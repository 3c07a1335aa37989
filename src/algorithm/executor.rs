use crate::{
    algorithm::collapse::{RandomSelector, collapse_cell},
    algorithm::propagation::propagate,
    algorithm::selection::find_min_entropy,
    analysis::adjacency::{AdjacencyModel, Color},
    io::configuration::MAX_GRID_DIMENSION,
    io::error::{
        AlgorithmError, ErrorContext, Result, WithContext, invalid_operation, invalid_parameter,
    },
    spatial::{CellView, Grid, Position},
};
use ndarray::Array2;

/// Grid size and seed for one generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Seed for every random choice of the run
    pub seed: u64,
}

impl GenerationConfig {
    /// Check grid dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds
    /// [`MAX_GRID_DIMENSION`]
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// What a single generation step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was resolved and its consequences propagated
    Collapsed {
        /// Cell chosen by selection or override
        position: Position,
        /// Color it resolved to
        color: Color,
        /// Every cell resolved in this step, `position` first
        collapsed: Vec<Position>,
    },
    /// Override targeted a cell that was already resolved
    Unchanged,
    /// No selectable cell remains
    Complete,
}

/// Adjacency-constrained grid generator
///
/// Owns the learned model, the grid and the random source. Each
/// [`Generator::step`] performs selection, collapse and the full
/// propagation cascade before returning, so callers observe the grid only
/// between whole steps.
pub struct Generator {
    model: AdjacencyModel,
    config: GenerationConfig,
    grid: Grid,
    random_selector: RandomSelector,
    steps: usize,
    contradiction: Option<Position>,
}

impl Generator {
    /// Create a generator with a fresh grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has no conditions ([`AlgorithmError::EmptySample`])
    /// - The configured dimensions are invalid
    pub fn new(model: AdjacencyModel, config: GenerationConfig) -> Result<Self> {
        if model.is_empty() {
            return Err(AlgorithmError::EmptySample { dimensions: (0, 0) });
        }
        config.validate()?;

        tracing::info!(
            conditions = model.len(),
            colors = model.palette().len(),
            width = config.width,
            height = config.height,
            seed = config.seed,
            "generator initialized"
        );

        let grid = Grid::new(config.width, config.height, &model);
        Ok(Self {
            model,
            config,
            grid,
            random_selector: RandomSelector::new(config.seed),
            steps: 0,
            contradiction: None,
        })
    }

    /// Learned model shared by every cell
    pub const fn model(&self) -> &AdjacencyModel {
        &self.model
    }

    /// Run configuration
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Current grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of collapse operations performed since the last reset
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Position of the reported contradiction, if generation is halted
    pub const fn contradiction(&self) -> Option<Position> {
        self.contradiction
    }

    /// Number of resolved cells
    pub fn collapsed_count(&self) -> usize {
        self.grid.collapsed_count()
    }

    /// Whether every cell is resolved
    pub fn is_complete(&self) -> bool {
        self.grid.is_fully_collapsed()
    }

    /// Per-cell color and collapse flag for rendering
    pub fn snapshot(&self) -> Array2<CellView> {
        self.grid.snapshot()
    }

    /// Discard the grid and start over with the same model
    ///
    /// The random source keeps advancing so a retry explores new choices.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.config.width, self.config.height, &self.model);
        self.steps = 0;
        self.contradiction = None;
    }

    /// Pick a uniformly random position inside the grid
    pub fn random_position(&mut self) -> Position {
        let row = self.random_selector.index(self.grid.height()).unwrap_or(0);
        let col = self.random_selector.index(self.grid.width()).unwrap_or(0);
        [row, col]
    }

    /// Perform one select, collapse and propagate step
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::Contradiction`] if propagation empties a
    /// cell, or if an earlier step already did and the grid was not reset
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.ensure_not_halted()?;

        let Some(position) = find_min_entropy(&self.grid) else {
            return Ok(StepOutcome::Complete);
        };

        self.resolve(position, "step")
    }

    /// Collapse a specific cell, then propagate
    ///
    /// A cell that is already collapsed is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The position lies outside the grid
    /// - Propagation hits a contradiction, or generation is already halted
    pub fn force_collapse(&mut self, position: Position) -> Result<StepOutcome> {
        self.ensure_not_halted()?;

        let Some(cell) = self.grid.get(position) else {
            return Err(invalid_operation(
                "force_collapse",
                Some(position),
                &format!(
                    "position outside {}x{} grid",
                    self.grid.width(),
                    self.grid.height()
                ),
            ));
        };

        if cell.is_collapsed() {
            return Ok(StepOutcome::Unchanged);
        }

        self.resolve(position, "force_collapse")
    }

    /// Step until the grid is complete or `max_steps` steps have run
    ///
    /// Returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by [`Generator::step`]
    pub fn run_to_completion(&mut self, max_steps: usize) -> Result<usize> {
        let mut taken = 0;
        while taken < max_steps {
            match self.step()? {
                StepOutcome::Complete => break,
                _ => taken += 1,
            }
        }
        Ok(taken)
    }

    fn ensure_not_halted(&self) -> Result<()> {
        match self.contradiction {
            Some(position) => Err(AlgorithmError::Contradiction {
                position,
                step: self.steps,
            }),
            None => Ok(()),
        }
    }

    fn resolve(&mut self, position: Position, operation: &'static str) -> Result<StepOutcome> {
        self.steps += 1;

        let color = collapse_cell(
            &mut self.grid,
            &self.model,
            position,
            &mut self.random_selector,
        )
        .with_context(ErrorContext {
            step: Some(self.steps),
            operation: Some(operation),
        })?;

        let report = match propagate(
            &mut self.grid,
            &self.model,
            position,
            &mut self.random_selector,
        )
        .with_step(self.steps)
        {
            Ok(report) => report,
            Err(error) => {
                if let AlgorithmError::Contradiction { position: stuck, .. } = &error {
                    self.contradiction = Some(*stuck);
                }
                return Err(error);
            }
        };

        tracing::debug!(
            step = self.steps,
            row = position[0],
            col = position[1],
            forced = report.forced(),
            "collapsed cell"
        );

        Ok(StepOutcome::Collapsed {
            position,
            color,
            collapsed: report.collapsed,
        })
    }
}
