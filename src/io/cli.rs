//! Command-line interface for batch processing PNG samples into generated grids

use crate::algorithm::executor::{GenerationConfig, Generator, StepOutcome};
use crate::analysis::sample::SampleImage;
use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_MAX_RETRIES, DEFAULT_SEED,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, VISUALIZATION_SUFFIX,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::export_snapshot_as_png;
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::Position;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate tile grids from adjacency rules learned from a sample image"
)]
/// Command-line arguments for the grid generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Cell to collapse before stepping, as ROW,COL (repeatable; default is one random cell)
    #[arg(long = "start", value_name = "ROW,COL", value_parser = parse_position)]
    pub start: Vec<Position>,

    /// Reset-and-retry attempts after a contradiction
    #[arg(short, long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub retries: usize,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter for this invocation
    pub const fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Generation settings taken from the arguments
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
        }
    }
}

/// Parse a `ROW,COL` grid position
///
/// # Errors
///
/// Returns a message if the value is not two comma-separated integers
pub fn parse_position(value: &str) -> std::result::Result<Position, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got '{value}'"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    Ok([row, col])
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, generation or export fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.generation_config().validate()?;
        self.validate_starts()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            tracing::info!("nothing to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn validate_starts(&self) -> Result<()> {
        let (width, height) = (self.cli.width, self.cli.height);
        for &[row, col] in &self.cli.start {
            if row >= height || col >= width {
                return Err(invalid_parameter(
                    "start",
                    &format!("{row},{col}"),
                    &format!("outside {width}x{height} grid"),
                ));
            }
        }
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_png(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let entries =
                std::fs::read_dir(&self.cli.target).map_err(|e| AlgorithmError::FileSystem {
                    path: self.cli.target.clone(),
                    operation: "read directory",
                    source: e,
                })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_png(&path) && !is_generated_output(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path);
        if output_path.exists() {
            tracing::info!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();

        let sample = SampleImage::from_png_file(input_path)?;
        let model = sample.learn_model()?;
        let mut generator = Generator::new(model, self.cli.generation_config())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, generator.grid().len());
        }

        let mut capture = self.cli.visualize.then(|| {
            VisualizationCapture::new(
                generator.grid().height(),
                generator.grid().width(),
                &generator.model().palette(),
            )
        });

        let mut attempt = 1;
        loop {
            match self.generate(&mut generator, capture.as_mut(), index) {
                Ok(()) => break,
                Err(error) if error.is_contradiction() && attempt <= self.cli.retries => {
                    attempt += 1;
                    tracing::warn!(%error, attempt, "resetting grid after contradiction");
                    generator.reset();
                    if let Some(ref mut viz) = capture {
                        viz.clear();
                    }
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.restart_file(index, attempt);
                    }
                }
                Err(error) => return Err(error),
            }
        }

        export_snapshot_as_png(&generator.snapshot(), &output_path(input_path))?;

        if let Some(ref viz) = capture {
            viz.export_gif(&visualization_path(input_path), GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        tracing::info!(
            input = %input_path.display(),
            steps = generator.steps(),
            attempts = attempt,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "generation complete"
        );

        Ok(())
    }

    /// Apply start positions, then step until the grid is complete
    fn generate(
        &mut self,
        generator: &mut Generator,
        mut capture: Option<&mut VisualizationCapture>,
        index: usize,
    ) -> Result<()> {
        let starts = if self.cli.start.is_empty() {
            vec![generator.random_position()]
        } else {
            self.cli.start.clone()
        };

        for start in starts {
            let outcome = generator.force_collapse(start)?;
            record_outcome(generator, capture.as_deref_mut(), &outcome);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.update_collapsed(index, generator.collapsed_count());
        }

        // Every productive step collapses at least one cell
        let max_steps = generator.grid().len();
        for _ in 0..=max_steps {
            let outcome = generator.step()?;
            if outcome == StepOutcome::Complete {
                return Ok(());
            }
            record_outcome(generator, capture.as_deref_mut(), &outcome);

            if let Some(ref mut pm) = self.progress_manager {
                pm.update_collapsed(index, generator.collapsed_count());
            }
        }

        Ok(())
    }
}

fn record_outcome(
    generator: &Generator,
    capture: Option<&mut VisualizationCapture>,
    outcome: &StepOutcome,
) {
    let (Some(viz), StepOutcome::Collapsed { collapsed, .. }) = (capture, outcome) else {
        return;
    };
    for &position in collapsed {
        if let Some(color) = generator.grid().get(position).and_then(|c| c.color()) {
            viz.record_collapse(position, color, generator.steps());
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Path of the generated PNG for an input sample
pub fn output_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, OUTPUT_SUFFIX, "png")
}

/// Path of the visualization GIF for an input sample
pub fn visualization_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, VISUALIZATION_SUFFIX, "gif")
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
