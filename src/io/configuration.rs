//! Generation constants and runtime configuration defaults

/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 128;
/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 128;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of reset-and-retry attempts after a contradiction
pub const DEFAULT_MAX_RETRIES: usize = 10;

/// Placeholder color reported for cells that are not collapsed yet
pub const UNRESOLVED_COLOR: [u8; 3] = [0, 0, 0];

/// Entropy stored on collapsed cells
pub const COLLAPSED_ENTROPY: f64 = 0.0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upper bound on rendered GIF frames, larger runs merge steps per frame
pub const MAX_GIF_FRAMES: usize = 400;
