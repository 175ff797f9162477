use mandelzoom_core::Resolution;

use crate::error::RenderError;
use crate::gradient::Rgb;

/// An RGB pixel buffer representing a rendered frame.
///
/// Row-major, row 0 at the top, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data, `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

impl FrameBuffer {
    pub const CHANNELS: usize = 3;

    /// Create a new buffer filled with black.
    ///
    /// Fails with [`RenderError::InvalidDimensions`] when the frame is too
    /// large to address or allocate.
    pub fn new(resolution: Resolution) -> crate::Result<Self> {
        let invalid = || RenderError::InvalidDimensions {
            width: resolution.width,
            height: resolution.height,
        };
        let len = (resolution.width as usize)
            .checked_mul(resolution.height as usize)
            .and_then(|n| n.checked_mul(Self::CHANNELS))
            .ok_or_else(invalid)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| invalid())?;
        pixels.resize(len, 0);

        Ok(Self {
            width: resolution.width,
            height: resolution.height,
            pixels,
        })
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * Self::CHANNELS
    }

    #[inline]
    fn offset(&self, col: u32, row: u32) -> usize {
        debug_assert!(col < self.width && row < self.height);
        row as usize * self.stride() + col as usize * Self::CHANNELS
    }

    pub fn pixel(&self, col: u32, row: u32) -> Rgb {
        let i = self.offset(col, row);
        Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    pub fn set_pixel(&mut self, col: u32, row: u32, color: Rgb) {
        let i = self.offset(col, row);
        self.pixels[i..i + Self::CHANNELS].copy_from_slice(&color.to_array());
    }

    /// The bytes of a single row.
    pub fn row(&self, row: u32) -> &[u8] {
        let start = row as usize * self.stride();
        &self.pixels[start..start + self.stride()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_black() {
        let buf = FrameBuffer::new(Resolution::new(4, 3).unwrap()).unwrap();
        assert_eq!(buf.pixels.len(), 4 * 3 * 3);
        assert!(buf.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn set_pixel_writes_row_major() {
        let mut buf = FrameBuffer::new(Resolution::new(8, 4).unwrap()).unwrap();
        let red = Rgb::new(255, 0, 0);
        buf.set_pixel(2, 1, red);

        let idx = (1 * 8 + 2) * 3;
        assert_eq!(&buf.pixels[idx..idx + 3], &[255, 0, 0]);
        assert_eq!(buf.pixel(2, 1), red);
        assert_eq!(buf.pixel(0, 0), Rgb::BLACK);
        assert_eq!(&buf.row(1)[6..9], &[255, 0, 0]);
        assert_eq!(buf.row(1).len(), buf.stride());
    }

    #[test]
    fn unaddressable_frame_is_rejected() {
        let res = Resolution::new(u32::MAX, u32::MAX).unwrap();
        assert!(matches!(
            FrameBuffer::new(res),
            Err(RenderError::InvalidDimensions {
                width: u32::MAX,
                height: u32::MAX
            })
        ));
    }
}
