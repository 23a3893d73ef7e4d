pub const PIXEL_BITS: usize = 4;

/// RGBA framebuffer handed to the draw callback. One pixel per grid cell.
pub struct RenderFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub buffer: &'a mut [u8],
}

impl<'a> RenderFrame<'a> {
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8; PIXEL_BITS]> {
        self.buffer
            .chunks_exact_mut(PIXEL_BITS)
            .filter_map(|chunk| chunk.try_into().ok())
    }

    /// Pixels of row `y`, left to right.
    pub fn row_mut(&mut self, y: u32) -> Option<impl Iterator<Item = &mut [u8; PIXEL_BITS]>> {
        let range = self.row_range(y)?;

        Some(
            self.buffer[range]
                .chunks_exact_mut(PIXEL_BITS)
                .filter_map(|chunk| chunk.try_into().ok()),
        )
    }

    pub fn fill(&mut self, color: [u8; PIXEL_BITS]) {
        for pixel in self.pixels_mut() {
            *pixel = color;
        }
    }

    fn row_range(&self, y: u32) -> Option<std::ops::Range<usize>> {
        let row_bytes = self.width as usize * PIXEL_BITS;
        let start = y as usize * row_bytes;
        let end = start + row_bytes;

        (y < self.height && end <= self.buffer.len()).then_some(start..end)
    }
}
