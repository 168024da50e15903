use crate::error::RenderError;
use crate::palette::{argb_to_rgba, INTERIOR};

/// A packed-ARGB pixel buffer, one `u32` per pixel, row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a new buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![INTERIOR; width as usize * height as usize],
        })
    }

    /// Reallocate for new dimensions. Existing content is not preserved.
    pub fn resize(&mut self, width: u32, height: u32) -> crate::Result<()> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, INTERIOR);
        Ok(())
    }

    /// Write a pixel given signed coordinates, ignoring anything off-buffer.
    #[inline]
    pub fn put_clipped(&mut self, x: i64, y: i64, argb: u32) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            self.pixels[y as usize * self.width as usize + x as usize] = argb;
        }
    }

    /// Expand to RGBA bytes (4 per pixel), the layout texture uploads expect.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &px in &self.pixels {
            out.extend_from_slice(&argb_to_rgba(px));
        }
        out
    }
}

fn check_dimensions(width: u32, height: u32) -> crate::Result<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// The writable target a frame is drawn into and then shown.
///
/// Window and texture management live behind this trait; the scheduler
/// only writes pixels and asks for a present once per frame.
pub trait DisplaySurface {
    fn buffer(&self) -> &PixelBuffer;

    fn buffer_mut(&mut self) -> &mut PixelBuffer;

    /// Show the current buffer contents. Called every frame, dirty or not.
    fn present(&mut self);

    fn resize(&mut self, width: u32, height: u32) -> crate::Result<()> {
        self.buffer_mut().resize(width, height)
    }

    fn width(&self) -> u32 {
        self.buffer().width
    }

    fn height(&self) -> u32 {
        self.buffer().height
    }
}

/// A bare buffer is a headless surface: presenting it does nothing.
impl DisplaySurface for PixelBuffer {
    fn buffer(&self) -> &PixelBuffer {
        self
    }

    fn buffer_mut(&mut self) -> &mut PixelBuffer {
        self
    }

    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_black_opaque() {
        let buf = PixelBuffer::new(4, 3).unwrap();
        assert_eq!(buf.pixels.len(), 12);
        assert!(buf.pixels.iter().all(|&p| p == 0xFF00_0000));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            PixelBuffer::new(0, 10),
            Err(RenderError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        assert!(buf.resize(5, 0).is_err());
        assert_eq!((buf.width, buf.height), (2, 2));
    }

    #[test]
    fn resize_discards_content() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.pixels.fill(0xFFFF_FFFF);
        buf.resize(3, 1).unwrap();
        assert_eq!((buf.width, buf.height), (3, 1));
        assert_eq!(buf.pixels, vec![0xFF00_0000; 3]);
    }

    #[test]
    fn put_clipped_ignores_outside() {
        let mut buf = PixelBuffer::new(3, 3).unwrap();
        buf.put_clipped(-1, 0, 0xFFFF_0000);
        buf.put_clipped(3, 1, 0xFFFF_0000);
        buf.put_clipped(1, 2, 0xFFFF_0000);
        assert_eq!(buf.pixels[2 * 3 + 1], 0xFFFF_0000);
        assert_eq!(buf.pixels.iter().filter(|&&p| p == 0xFFFF_0000).count(), 1);
    }

    #[test]
    fn rgba_bytes_layout() {
        let mut buf = PixelBuffer::new(2, 1).unwrap();
        buf.pixels[1] = 0xFF10_2030;
        assert_eq!(buf.to_rgba_bytes(), vec![0, 0, 0, 255, 0x10, 0x20, 0x30, 255]);
    }
}
