//! Layer pixel buffers with tear-free publication.

use bytemuck::{Pod, Zeroable};

/// One RGBA8 pixel. Classification writes all four channels at once, so
/// a pixel is never observed partially updated.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel(pub [u8; 4]);

impl Pixel {
    /// Sample point is inside the model: opaque white.
    pub const INSIDE: Self = Self([255, 255, 255, 255]);
    /// Sample point is outside (or there is no model): opaque black.
    pub const OUTSIDE: Self = Self([0, 0, 0, 255]);
    /// Uninitialized/background fill, same value as OUTSIDE.
    pub const BACKGROUND: Self = Self([0, 0, 0, 255]);
}

/// One layer's W×H pixel buffer, row-major from the top-left.
///
/// The engine writes into a working buffer; [`PixelStore::commit`]
/// publishes a finished frame to the committed view that display and
/// export read. Readers therefore never see a half-classified grid, and
/// an uncommitted pass is simply invisible.
#[derive(Debug)]
pub struct PixelStore {
    width: u32,
    height: u32,
    working: Vec<Pixel>,
    committed: Vec<Pixel>,
}

impl PixelStore {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            working: vec![Pixel::BACKGROUND; len],
            committed: vec![Pixel::BACKGROUND; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Write one pixel of the in-progress frame.
    ///
    /// # Panics
    /// Out-of-grid coordinates are a caller bug.
    pub fn write(&mut self, x: u32, y: u32, px: Pixel) {
        assert!(x < self.width && y < self.height, "pixel out of grid");
        self.working[(y * self.width + x) as usize] = px;
    }

    /// Publish the working buffer as the new committed frame.
    pub fn commit(&mut self) {
        self.committed.copy_from_slice(&self.working);
    }

    /// The last committed frame, row-major RGBA.
    pub fn committed(&self) -> &[Pixel] {
        &self.committed
    }

    pub fn committed_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.committed)
    }
}
