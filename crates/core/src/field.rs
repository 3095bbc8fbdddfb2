//! The `FlowField` trait and the `Curve` selector enum.
//!
//! A flow field converts a particle position into a velocity vector, plus an
//! optional scalar color sample derived from velocity/position. Field
//! implementations are immutable per-frame instances: every time-, size-,
//! and parameter-derived constant is computed at construction from the frame
//! context snapshot, so all particles in one frame see an identical field.

use crate::error::FlowError;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A flow field evaluated once per particle per frame.
///
/// This trait is **object-safe**: `Box<dyn FlowField>` and `&dyn FlowField`
/// work for runtime dispatch, though the registry enum is the usual path.
pub trait FlowField {
    /// Velocity at `position`, in surface units per frame.
    fn velocity_at(&self, position: DVec2) -> DVec2;

    /// Whether this field produces color samples at all. Fields without a
    /// spatial color story keep the default `false`, which puts the whole
    /// frame on the flat-batch path.
    fn colorizes(&self) -> bool {
        false
    }

    /// Scalar color sample in [0, 1) for the stroke drawn this frame.
    /// `Some` for every position when [`colorizes`](Self::colorizes) is true,
    /// `None` (the default) otherwise.
    fn color_sample_at(&self, velocity: DVec2, position: DVec2) -> Option<f64> {
        let _ = (velocity, position);
        None
    }
}

/// Wraps a color sample into [0, 1).
pub fn wrap_percent(x: f64) -> f64 {
    let wrapped = x.rem_euclid(1.0);
    // rem_euclid(1.0) of a value like -1e-17 rounds to exactly 1.0.
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// The named flow fields a frame can select between.
///
/// Dispatch on this enum is exhaustive everywhere (no catch-all arms), so
/// adding a field is a closed, compiler-verified change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Curve {
    Vortex,
    #[default]
    #[serde(rename = "Sweeping Right")]
    SweepingRight,
    #[serde(rename = "Zig Zag")]
    ZigZag,
    Magnet,
    Swirls,
    Eyes,
    #[serde(rename = "Curved Stripes")]
    CurvedStripes,
}

impl Curve {
    /// Every curve, in selection-menu order.
    pub const ALL: [Curve; 7] = [
        Curve::Vortex,
        Curve::SweepingRight,
        Curve::ZigZag,
        Curve::Magnet,
        Curve::Swirls,
        Curve::Eyes,
        Curve::CurvedStripes,
    ];

    /// The display name, as the configuration layer spells it.
    pub fn name(self) -> &'static str {
        match self {
            Curve::Vortex => "Vortex",
            Curve::SweepingRight => "Sweeping Right",
            Curve::ZigZag => "Zig Zag",
            Curve::Magnet => "Magnet",
            Curve::Swirls => "Swirls",
            Curve::Eyes => "Eyes",
            Curve::CurvedStripes => "Curved Stripes",
        }
    }

    /// Resolves a display name; unrecognized names are
    /// `FlowError::UnknownCurve` — a fatal configuration error.
    pub fn from_name(name: &str) -> Result<Curve, FlowError> {
        Curve::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| FlowError::UnknownCurve(name.to_string()))
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
