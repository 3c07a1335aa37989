//! Sample image decoding into a row-major color array

use crate::analysis::adjacency::{AdjacencyModel, Color};
use crate::io::error::{AlgorithmError, Result};
use ndarray::Array2;
use std::path::Path;

/// Decoded sample pixels ready for adjacency learning
#[derive(Debug, Clone)]
pub struct SampleImage {
    pixels: Array2<Color>,
}

impl SampleImage {
    /// Load a sample from a PNG file, dropping the alpha channel
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgb_img = img.to_rgb8();

        let (width, height) = (rgb_img.width() as usize, rgb_img.height() as usize);
        let mut pixels = Array2::from_elem((height, width), [0u8; 3]);

        for (x, y, pixel) in rgb_img.enumerate_pixels() {
            if let Some(slot) = pixels.get_mut([y as usize, x as usize]) {
                *slot = pixel.0;
            }
        }

        Ok(Self { pixels })
    }

    /// Wrap an already decoded color array laid out as `[row, col]`
    pub const fn from_pixels(pixels: Array2<Color>) -> Self {
        Self { pixels }
    }

    /// Sample dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    /// Raw pixel array
    pub const fn pixels(&self) -> &Array2<Color> {
        &self.pixels
    }

    /// Learn the adjacency model for this sample
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::EmptySample`] if the sample yields no conditions
    pub fn learn_model(&self) -> Result<AdjacencyModel> {
        let model = AdjacencyModel::learn(&self.pixels);
        if model.is_empty() {
            return Err(AlgorithmError::EmptySample {
                dimensions: self.dimensions(),
            });
        }
        Ok(model)
    }
}
