//! The per-frame simulation context: surface bounds, timing, and the
//! parameter snapshot.
//!
//! The driver assembles one [`FrameContext`] per frame and the core only
//! reads it. Field constructors and the particle pass both consume the same
//! snapshot, so parameter commits between frames never tear a frame.

use crate::error::FlowError;
use crate::params::ParamValues;
use glam::DVec2;

/// Surface dimensions in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    width: f64,
    height: f64,
}

impl SurfaceSize {
    /// Both dimensions must be positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, FlowError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(FlowError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The smaller dimension, the reference scale for field geometry.
    pub fn min_dim(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `p` lies inside `[0, width] × [0, height]` (bounds inclusive).
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Frame timing in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Seconds since the animation started.
    pub elapsed: f64,
    /// Seconds since the previous frame. Must be positive; several fields
    /// divide by it.
    pub delta: f64,
}

impl FrameTiming {
    pub fn new(elapsed: f64, delta: f64) -> Self {
        Self { elapsed, delta }
    }
}

/// Everything one frame needs, captured before the frame runs.
#[derive(Debug, Clone)]
pub struct FrameContext {
    pub surface: SurfaceSize,
    pub timing: FrameTiming,
    pub params: ParamValues,
}

impl FrameContext {
    pub fn new(surface: SurfaceSize, timing: FrameTiming, params: ParamValues) -> Self {
        Self {
            surface,
            timing,
            params,
        }
    }
}
