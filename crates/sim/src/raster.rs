//! CPU rasterization of draw lists.
//!
//! A [`Raster`] is an owned RGBA8 buffer that consumes [`DrawList`]s: fades
//! alpha-composite over the whole surface, segments draw with DDA stepping.
//! This is the headless rendering seam — the CLI runs frames against it and
//! writes PNG snapshots; an interactive driver would replay the same lists
//! against its own canvas.

use flowfield_core::color::Rgb;
use flowfield_core::draw::{DrawList, DrawOp, Segment};
use flowfield_core::error::FlowError;
#[cfg(feature = "png")]
use std::path::Path;

/// An owned RGBA8 pixel buffer, row-major, alpha always 255.
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a white surface of the given pixel dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = (width as usize) * (height as usize) * 4;
        Ok(Self {
            width,
            height,
            pixels: vec![255; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read-only access to the RGBA8 data.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Applies every instruction of `list` in order.
    pub fn apply(&mut self, list: &DrawList) {
        for op in list {
            match op {
                DrawOp::Fade { color, alpha } => self.fade(*color, *alpha),
                DrawOp::Batch { color, segments } => {
                    for segment in segments {
                        self.draw_segment(*color, *segment);
                    }
                }
                DrawOp::Stroke { color, segment } => self.draw_segment(*color, *segment),
            }
        }
    }

    /// Composites `color` at `alpha` over the whole surface.
    fn fade(&mut self, color: Rgb, alpha: u8) {
        let a = alpha as f64 / 255.0;
        let overlay = [color.r as f64, color.g as f64, color.b as f64];
        for pixel in self.pixels.chunks_exact_mut(4) {
            for (channel, &over) in pixel.iter_mut().zip(&overlay) {
                let base = *channel as f64;
                *channel = (base + (over - base) * a).round() as u8;
            }
        }
    }

    /// Plots the segment with DDA stepping, one pixel per unit of the longer
    /// axis. Out-of-bounds steps are skipped, not clipped.
    fn draw_segment(&mut self, color: Rgb, segment: Segment) {
        let span = segment.to - segment.from;
        let steps = span.x.abs().max(span.y.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = segment.from.lerp(segment.to, t);
            self.plot(p.x.round(), p.y.round(), color);
        }
    }

    fn plot(&mut self, x: f64, y: f64, color: Rgb) {
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = 255;
    }

    /// Writes the surface as a PNG.
    #[cfg(feature = "png")]
    pub fn write_png(&self, path: &Path) -> Result<(), FlowError> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| FlowError::Io("RGBA buffer size mismatch".into()))?;
        img.save(path).map_err(|e| FlowError::Io(e.to_string()))
    }
}
