//! Pixel buffers and the rendering interface.
//!
//! Elements never draw. Anything that needs pixels (menu items, fills) asks
//! the scene's [`Renderer`] for a [`PixelBuffer`] and displays the result.
//! [`MemoryRenderer`] renders fills into plain ARGB32 memory and is used in
//! tests and headless setups.

use crate::error::RenderError;
use novawm_core::types::{Color, FillStyle, FontStyle, Size};
use std::fmt;
use std::rc::Rc;

#[derive(PartialEq, Eq)]
struct PixelData {
    width: i32,
    height: i32,
    pixels: Vec<u32>,
}

/// An immutable, cheaply clonable ARGB32 raster.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer(Rc<PixelData>);

impl PixelBuffer {
    /// Wraps `pixels`, which must hold exactly `width * height` words in
    /// row-major order.
    pub fn new(width: i32, height: i32, pixels: Vec<u32>) -> Result<Self, RenderError> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(RenderError::Backend(format!(
                "pixel data holds {} words, expected {}",
                pixels.len(),
                expected
            )));
        }
        Ok(PixelBuffer(Rc::new(PixelData {
            width,
            height,
            pixels,
        })))
    }

    /// A buffer filled with one color.
    pub fn filled(width: i32, height: i32, color: Color) -> Result<Self, RenderError> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        let pixels = vec![color.to_argb32(); (width as usize) * (height as usize)];
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> i32 {
        self.0.width
    }

    pub fn height(&self) -> i32 {
        self.0.height
    }

    pub fn size(&self) -> Size<i32> {
        Size::new(self.0.width, self.0.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.0.pixels
    }

    /// The pixel at (`x`, `y`), or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.0.width || y >= self.0.height {
            return None;
        }
        self.0.pixels.get((y * self.0.width + x) as usize).copied()
    }

    /// True if both handles refer to the same raster (not merely equal pixels).
    pub fn same_as(&self, other: &PixelBuffer) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.0.width)
            .field("height", &self.0.height)
            .finish()
    }
}

/// Everything needed to draw one face of a menu item.
#[derive(Debug, Clone, Copy)]
pub struct MenuItemFace<'a> {
    pub fill: &'a FillStyle,
    pub text: &'a str,
    pub font: &'a FontStyle,
    pub text_color: Color,
    pub bezel_width: i32,
}

/// Produces pixel buffers from style descriptors.
pub trait Renderer {
    fn render_fill(&self, size: Size<i32>, fill: &FillStyle) -> Result<PixelBuffer, RenderError>;

    fn render_menu_item(
        &self,
        size: Size<i32>,
        face: &MenuItemFace<'_>,
    ) -> Result<PixelBuffer, RenderError>;
}

/// Software renderer for fills and bezels. Text is not rasterized.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryRenderer;

impl MemoryRenderer {
    fn fill_pixels(size: Size<i32>, fill: &FillStyle) -> Result<Vec<u32>, RenderError> {
        let (width, height) = (size.width, size.height);
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        let ratio = |pos: i32, extent: i32| {
            if extent <= 1 {
                0.0
            } else {
                pos as f32 / (extent - 1) as f32
            }
        };
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                let color = match fill {
                    FillStyle::Solid { color } => *color,
                    FillStyle::HorizontalGradient { from, to } => from.interpolate(*to, ratio(x, width)),
                    FillStyle::VerticalGradient { from, to } => from.interpolate(*to, ratio(y, height)),
                    FillStyle::DiagonalGradient { from, to } => from.interpolate(
                        *to,
                        (ratio(x, width) + ratio(y, height)) / 2.0,
                    ),
                };
                pixels.push(color.to_argb32());
            }
        }
        Ok(pixels)
    }
}

impl Renderer for MemoryRenderer {
    fn render_fill(&self, size: Size<i32>, fill: &FillStyle) -> Result<PixelBuffer, RenderError> {
        let pixels = Self::fill_pixels(size, fill)?;
        PixelBuffer::new(size.width, size.height, pixels)
    }

    fn render_menu_item(
        &self,
        size: Size<i32>,
        face: &MenuItemFace<'_>,
    ) -> Result<PixelBuffer, RenderError> {
        let mut pixels = Self::fill_pixels(size, face.fill)?;
        let base = face.fill.primary_color();
        let light = base.interpolate(Color::WHITE, 0.5).to_argb32();
        let dark = base.interpolate(Color::BLACK, 0.5).to_argb32();
        let bezel = face.bezel_width.clamp(0, size.width.min(size.height) / 2);
        for y in 0..size.height {
            for x in 0..size.width {
                let idx = (y * size.width + x) as usize;
                if x < bezel || y < bezel {
                    pixels[idx] = light;
                } else if x >= size.width - bezel || y >= size.height - bezel {
                    pixels[idx] = dark;
                }
            }
        }
        tracing::trace!(
            "Rendered menu item face '{}' ({}x{}, font {} {}px)",
            face.text,
            size.width,
            size.height,
            face.font.face,
            face.font.size
        );
        PixelBuffer::new(size.width, size.height, pixels)
    }
}
