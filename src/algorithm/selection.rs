use crate::io::error::{Result, invalid_operation};
use crate::spatial::{Grid, Position};

/// Find the selectable cell with the lowest stored entropy
///
/// Ties go to the first cell in row-major order. Collapsed cells and cells
/// left empty by a contradiction are skipped. Returns `None` when nothing
/// remains to collapse.
pub fn find_min_entropy(grid: &Grid) -> Option<Position> {
    let mut best: Option<(Position, f64)> = None;

    for (position, cell) in grid.iter() {
        if !cell.is_selectable() {
            continue;
        }
        let entropy = cell.entropy();
        match best {
            Some((_, lowest)) if entropy >= lowest => {}
            _ => best = Some((position, entropy)),
        }
    }

    best.map(|(position, _)| position)
}

/// Select the next cell to collapse
///
/// # Errors
///
/// Returns [`crate::AlgorithmError::InvalidOperation`] if the grid has no
/// selectable cell left
pub fn select_min_entropy(grid: &Grid) -> Result<Position> {
    find_min_entropy(grid).ok_or_else(|| {
        invalid_operation(
            "select",
            None,
            &format!(
                "no uncollapsed cell remains in {}x{} grid",
                grid.width(),
                grid.height()
            ),
        )
    })
}
