pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

pub const PIXEL_ON: u32 = 0xFFFF_FFFF;
pub const PIXEL_OFF: u32 = 0x0000_0000;

/// 64x32 monochrome screen, one word per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixel_buffer: [u32; WIDTH * HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixel_buffer: [PIXEL_OFF; WIDTH * HEIGHT],
        }
    }

    pub fn clear_buffer(&mut self) {
        self.pixel_buffer.fill(PIXEL_OFF);
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixel_buffer
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.pixel_buffer[y * WIDTH + x] == PIXEL_ON
    }

    pub fn is_blank(&self) -> bool {
        self.pixel_buffer.iter().all(|&p| p == PIXEL_OFF)
    }

    /// XORs `sprite` (one byte per row, MSB leftmost) onto the screen and
    /// reports whether any lit pixel was switched off.
    ///
    /// Only the starting coordinate wraps. Row and column offsets are added
    /// to a linear index afterwards, so a sprite hanging off the right edge
    /// bleeds into the start of the next row, and rows past the bottom are
    /// dropped.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut vf = false;
        for (i, row) in sprite.iter().enumerate() {
            for j in 0..8 {
                if (row >> (7 - j)) & 1 == 0 {
                    continue;
                }
                let index = (y + i) * WIDTH + x + j;
                let Some(pixel) = self.pixel_buffer.get_mut(index) else {
                    continue;
                };
                if *pixel == PIXEL_ON {
                    vf = true;
                }
                *pixel ^= PIXEL_ON;
            }
        }
        vf
    }
}
