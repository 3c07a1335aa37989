//! Error types and context management for generation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load the sample image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Sample yielded no adjacency conditions, so no grid can be generated
    EmptySample {
        /// Sample dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// A cell's candidate set was narrowed to nothing during propagation
    ///
    /// The cell cannot satisfy any learned rule that agrees with its
    /// collapsed neighbors. Recovery is left to the caller.
    Contradiction {
        /// Grid position of the stuck cell as `[row, col]`
        position: [usize; 2],
        /// Generation step during which the contradiction surfaced
        step: usize,
    },

    /// Operation violated the generator's contract
    ///
    /// Occurs when:
    /// - Collapsing a cell that is already collapsed or has no candidates
    /// - Selecting from a grid with no uncollapsed cells
    /// - Addressing a position outside the grid
    InvalidOperation {
        /// Name of the attempted operation
        operation: &'static str,
        /// Grid position involved, if any
        position: Option<[usize; 2]>,
        /// Explanation of the violation
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Rendering input was unusable
    InvalidSourceData {
        /// Description of what's wrong with the data
        reason: String,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::EmptySample { dimensions } => {
                write!(
                    f,
                    "Sample of size {}x{} produced no adjacency conditions",
                    dimensions.0, dimensions.1
                )
            }
            Self::Contradiction { position, step } => {
                write!(
                    f,
                    "Contradiction at cell [{}, {}] during step {step}: no candidates remain",
                    position[0], position[1]
                )
            }
            Self::InvalidOperation {
                operation,
                position,
                reason,
            } => match position {
                Some(pos) => write!(
                    f,
                    "Invalid operation '{operation}' at [{}, {}]: {reason}",
                    pos[0], pos[1]
                ),
                None => write!(f, "Invalid operation '{operation}': {reason}"),
            },
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl AlgorithmError {
    /// Whether a reset-and-retry could plausibly succeed
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current generation step
    pub step: Option<usize>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with generator state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the step context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the step context applied
    fn with_step(self, step: usize) -> Result<T>;

    /// Rename the operation reported by an invalid operation error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation context applied
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                AlgorithmError::Contradiction { step, .. } => {
                    if let Some(current) = context.step {
                        *step = current;
                    }
                }
                AlgorithmError::InvalidOperation { operation, .. } => {
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_step(self, step: usize) -> Result<T> {
        self.with_context(ErrorContext {
            step: Some(step),
            ..Default::default()
        })
    }

    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            operation: Some(operation),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid operation error
pub fn invalid_operation(
    operation: &'static str,
    position: Option<[usize; 2]>,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidOperation {
        operation,
        position,
        reason: reason.to_string(),
    }
}
