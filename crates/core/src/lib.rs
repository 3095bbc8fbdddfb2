#![deny(unsafe_code)]
//! Core types for the flowfield animation engine.
//!
//! Provides the `FlowField` trait and `Curve` selector, `Rgb` color with the
//! channel-blend and hue-cycle transforms, the `CyclicGradient` weighted
//! interpolator, the typed `ParamStore` with change listeners, the per-frame
//! `FrameContext` snapshot, `DrawList` instructions, vector helpers over
//! `glam::DVec2`, and the `Xorshift64` PRNG.

pub mod color;
pub mod context;
pub mod draw;
pub mod error;
pub mod field;
pub mod gradient;
pub mod params;
pub mod prng;
pub mod vec2;

pub use color::{hue_cycle, Rgb};
pub use context::{FrameContext, FrameTiming, SurfaceSize};
pub use draw::{DrawList, DrawOp, Segment};
pub use error::FlowError;
pub use field::{Curve, FlowField};
pub use gradient::{CyclicGradient, GradientStop};
pub use params::{ColorMode, ParamKey, ParamStore, ParamValues};
pub use prng::Xorshift64;
