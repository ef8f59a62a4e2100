//! Bitmap rendering of a grid with an optional path overlay.

use std::io::Write;

use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder as _, Rgba, RgbaImage};

use crate::{
    error::MazeError,
    grid::{Grid, Position},
};

/// Color of wall cells.
pub const WALL: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Color of open cells.
pub const OPEN: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Color of path cells, drawn over walls and open cells alike.
pub const PATH: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Paints one pixel per cell.
///
/// Path cells outside the grid are skipped.
#[must_use]
pub fn paint(grid: &Grid, path: &[Position]) -> RgbaImage {
    let mut image = RgbaImage::from_fn(u32::from(grid.width()), u32::from(grid.height()), |x, y| {
        let is_wall = match (u16::try_from(x), u16::try_from(y)) {
            (Ok(x), Ok(y)) => grid.is_wall(x, y),
            _ => true,
        };
        if is_wall {
            WALL
        } else {
            OPEN
        }
    });

    for cell in path {
        if grid.contains(cell.x, cell.y) {
            image.put_pixel(u32::from(cell.x), u32::from(cell.y), PATH);
        }
    }

    image
}

/// Paints the grid and path and writes them to `sink` as a PNG.
///
/// # Errors
///
/// Returns [`MazeError::Render`] if encoding or writing to the sink fails.
pub fn write_png<W: Write>(grid: &Grid, path: &[Position], sink: W) -> Result<(), MazeError> {
    let image = paint(grid, path);
    PngEncoder::new(sink).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        path = path.len(),
        "rendered maze"
    );
    Ok(())
}
