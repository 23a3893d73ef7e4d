use libca::Cell;

use super::renderthing::frame::PIXEL_BITS;

pub type Color = [u8; PIXEL_BITS];

/// Two-color mapping between cells and RGBA pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPalette {
    pub background: Color,
    pub foreground: Color,
}

impl Default for CellPalette {
    fn default() -> Self {
        Self {
            background: [255, 255, 255, 255],
            foreground: [0, 0, 0, 255],
        }
    }
}

impl CellPalette {
    pub fn color(&self, cell: Cell) -> Color {
        match cell {
            Cell::Dead => self.background,
            Cell::Alive => self.foreground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_is_background_and_alive_is_foreground() {
        let palette = CellPalette::default();
        assert_eq!(palette.color(Cell::Dead), [255, 255, 255, 255]);
        assert_eq!(palette.color(Cell::Alive), [0, 0, 0, 255]);
        assert_ne!(palette.color(Cell::Dead), palette.color(Cell::Alive));
    }
}
