//! Frame capture and GIF generation for generation playback

use crate::analysis::adjacency::Color;
use crate::io::configuration::{MAX_GIF_FRAMES, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::Position;
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

/// A single cell resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseEvent {
    /// Grid position as `[row, col]`
    pub position: Position,
    /// Color the cell resolved to
    pub color: Color,
    /// Generation step that resolved it
    pub step: usize,
}

/// Captures cell resolutions for visualization
///
/// Records events during generation so the run can be replayed as an
/// animation afterwards, one frame per group of steps.
pub struct VisualizationCapture {
    events: Vec<CollapseEvent>,
    dims: (usize, usize),
    empty_color: [u8; 4],
}

impl VisualizationCapture {
    /// The average of the palette is used as the empty color
    pub fn new(rows: usize, cols: usize, palette: &[Color]) -> Self {
        let empty_color = if palette.is_empty() {
            [128, 128, 128, 255]
        } else {
            let mut sums = [0u32; 3];
            for color in palette {
                for (sum, &channel) in sums.iter_mut().zip(color) {
                    *sum += u32::from(channel);
                }
            }
            let count = palette.len() as u32;
            [
                (sums[0] / count) as u8,
                (sums[1] / count) as u8,
                (sums[2] / count) as u8,
                255,
            ]
        };

        Self {
            events: Vec::with_capacity(rows * cols),
            dims: (rows, cols),
            empty_color,
        }
    }

    /// Records a cell resolution
    pub fn record_collapse(&mut self, position: Position, color: Color, step: usize) {
        self.events.push(CollapseEvent {
            position,
            color,
            step,
        });
    }

    /// Drop everything recorded so far, used when the grid is reset
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[CollapseEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured steps as a GIF
    ///
    /// Steps are merged into frames when the requested delay is below what
    /// viewers support, or when the run has more steps than
    /// [`MAX_GIF_FRAMES`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No cell collapses captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let step_count = self.events.last().map_or(0, |e| e.step);
        let steps_per_frame = skip_factor.max(step_count.div_ceil(MAX_GIF_FRAMES));

        let frames = self.generate_frames(effective_delay_ms, steps_per_frame);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Replay events into frames, one frame every `steps_per_frame` steps
    pub fn generate_frames(&self, delay_ms: u32, steps_per_frame: usize) -> Vec<Frame> {
        let (rows, cols) = self.dims;
        let steps_per_frame = steps_per_frame.max(1);
        let mut img = RgbaImage::from_pixel(cols as u32, rows as u32, Rgba(self.empty_color));
        let mut frames = vec![Self::frame(&img, delay_ms)];

        let mut frame_step = None;
        for event in &self.events {
            let bucket = event.step.saturating_sub(1) / steps_per_frame;
            if frame_step.is_some_and(|current| current != bucket) {
                frames.push(Self::frame(&img, delay_ms));
            }
            frame_step = Some(bucket);

            let [row, col] = event.position;
            if row < rows && col < cols {
                let [r, g, b] = event.color;
                img.put_pixel(col as u32, row as u32, Rgba([r, g, b, 255]));
            }
        }

        // Final frame displays longer for better visibility
        frames.push(Self::frame(&img, delay_ms * 25));
        frames
    }

    fn frame(img: &RgbaImage, delay_ms: u32) -> Frame {
        Frame::from_parts(
            img.clone(),
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }
}
