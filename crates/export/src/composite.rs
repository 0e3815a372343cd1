//! Horizontal stitching of all layer buffers.

use raster::{LayerDescriptor, LayerSlot, Pixel};

/// The master image: every layer's committed buffer laid out
/// left-to-right in descriptor order, each block followed by its
/// configured gap, on a black background at the height of the tallest
/// layer. Layers are top-aligned; in practice the descriptor set declares
/// equal heights, and anything below a shorter layer keeps the background
/// fill.
///
/// Dimensions are fixed by the descriptor set, so the pixel buffer is
/// allocated once and refreshed in place — safe to rebuild every captured
/// frame without allocation growth.
#[derive(Debug)]
pub struct Composite {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Composite {
    #[must_use]
    pub fn new(descriptors: &[LayerDescriptor]) -> Self {
        let width = descriptors.iter().map(|d| d.width + d.gap).sum();
        let height = descriptors.iter().map(|d| d.height).max().unwrap_or(0);
        Self {
            width,
            height,
            pixels: vec![Pixel::BACKGROUND; width as usize * height as usize],
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal offset of layer `index`'s block: the widths and gaps of
    /// everything before it.
    #[must_use]
    pub fn layer_offset(descriptors: &[LayerDescriptor], index: usize) -> u32 {
        descriptors[..index].iter().map(|d| d.width + d.gap).sum()
    }

    /// Recompute the whole image from the current committed layer
    /// buffers. Full overwrite, never an incremental patch.
    pub fn refresh(&mut self, layers: &[LayerSlot]) {
        self.pixels.fill(Pixel::BACKGROUND);
        let mut x_offset = 0usize;
        for slot in layers {
            let w = slot.store.width() as usize;
            let h = slot.store.height() as usize;
            let src = slot.store.committed();
            for row in 0..h {
                let dst_start = row * self.width as usize + x_offset;
                self.pixels[dst_start..dst_start + w]
                    .copy_from_slice(&src[row * w..(row + 1) * w]);
            }
            x_offset += w + slot.descriptor.gap as usize;
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Row-major RGBA bytes, ready for the PNG encoder.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
