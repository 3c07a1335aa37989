//! PNG export of grid snapshots with transparent unresolved cells

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::CellView;
use image::{Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Convert one cell to an RGBA pixel, transparent while unresolved
pub const fn cell_pixel(view: &CellView) -> Rgba<u8> {
    if view.collapsed {
        Rgba([view.color[0], view.color[1], view.color[2], 255])
    } else {
        Rgba([0, 0, 0, 0])
    }
}

/// Render a snapshot as an image, one pixel per cell
pub fn render_snapshot(snapshot: &Array2<CellView>) -> RgbaImage {
    let (rows, cols) = snapshot.dim();
    let mut img = RgbaImage::new(cols as u32, rows as u32);

    for ((row, col), view) in snapshot.indexed_iter() {
        img.put_pixel(col as u32, row as u32, cell_pixel(view));
    }

    img
}

/// Export a grid snapshot as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The snapshot has no cells
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_snapshot_as_png(snapshot: &Array2<CellView>, output_path: &Path) -> Result<()> {
    if snapshot.is_empty() {
        return Err(AlgorithmError::InvalidSourceData {
            reason: "Snapshot contains no cells".to_string(),
        });
    }

    let img = render_snapshot(snapshot);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
