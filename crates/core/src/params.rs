//! Typed parameter store with synchronous change listeners.
//!
//! Parameters live in an explicit [`ParamStore`] passed by reference — no
//! globals. Setters validate before committing; listeners subscribe to
//! specific [`ParamKey`]s and run synchronously on commit with the
//! post-commit snapshot. The per-frame code never reads the store directly:
//! it takes a [`ParamValues`] snapshot once per frame so a mid-frame commit
//! cannot tear a frame.

use crate::color::Rgb;
use crate::error::FlowError;
use crate::field::Curve;
use crate::gradient::{CyclicGradient, GradientStop};
use serde::{Deserialize, Serialize};

/// Largest accepted particle count.
pub const NUM_PARTICLES_MAX: usize = 1_000_000_000_000_000;

/// How strokes are colored each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Hue sweeps the color wheel with the field's color sample.
    #[serde(rename = "Hue Cycle")]
    HueCycle,
    /// The color sample indexes the configured gradient map.
    #[default]
    #[serde(rename = "Custom Gradient")]
    CustomGradient,
    /// One flat stroke color for every particle.
    Flat,
}

impl ColorMode {
    pub const ALL: [ColorMode; 3] = [
        ColorMode::HueCycle,
        ColorMode::CustomGradient,
        ColorMode::Flat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorMode::HueCycle => "Hue Cycle",
            ColorMode::CustomGradient => "Custom Gradient",
            ColorMode::Flat => "Flat",
        }
    }

    pub fn from_name(name: &str) -> Result<ColorMode, FlowError> {
        ColorMode::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| FlowError::UnknownColorMode(name.to_string()))
    }
}

/// Identifies one parameter for listener subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    UseColor,
    Speed,
    NumParticles,
    Background,
    DrawOpacity,
    Curve,
    ColorMode,
    ColorMap,
}

/// A plain snapshot of every parameter value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamValues {
    pub use_color: bool,
    pub speed: f64,
    pub num_particles: usize,
    pub background: Rgb,
    pub draw_opacity: u8,
    pub curve: Curve,
    pub color_mode: ColorMode,
    pub color_map: Vec<GradientStop>,
}

impl Default for ParamValues {
    fn default() -> Self {
        Self {
            use_color: true,
            speed: 0.5,
            num_particles: 10_000,
            background: Rgb::WHITE,
            draw_opacity: 13,
            curve: Curve::default(),
            color_mode: ColorMode::default(),
            color_map: vec![GradientStop::new(Rgb::BLACK, 1.0)],
        }
    }
}

type Callback = Box<dyn FnMut(&ParamValues)>;

struct Subscription {
    keys: Vec<ParamKey>,
    callback: Callback,
}

/// Owns the live parameter values plus the subscription list.
///
/// Each setter validates, commits, then synchronously invokes every listener
/// whose key set contains the changed key, passing the post-commit snapshot.
#[derive(Default)]
pub struct ParamStore {
    values: ParamValues,
    subscriptions: Vec<Subscription>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: ParamValues) -> Self {
        Self {
            values,
            subscriptions: Vec::new(),
        }
    }

    /// Borrow of the current values (typed getters in one place).
    pub fn values(&self) -> &ParamValues {
        &self.values
    }

    /// A consistent copy for the frame about to run.
    pub fn snapshot(&self) -> ParamValues {
        self.values.clone()
    }

    /// Registers a listener for the given keys, invoked synchronously on
    /// every commit of any of them.
    pub fn subscribe(&mut self, keys: &[ParamKey], callback: impl FnMut(&ParamValues) + 'static) {
        self.subscriptions.push(Subscription {
            keys: keys.to_vec(),
            callback: Box::new(callback),
        });
    }

    fn commit(&mut self, key: ParamKey) {
        let snapshot = self.values.clone();
        for sub in &mut self.subscriptions {
            if sub.keys.contains(&key) {
                (sub.callback)(&snapshot);
            }
        }
    }

    pub fn set_use_color(&mut self, on: bool) {
        self.values.use_color = on;
        self.commit(ParamKey::UseColor);
    }

    /// Speed must lie in [0, 1].
    pub fn set_speed(&mut self, speed: f64) -> Result<(), FlowError> {
        if !speed.is_finite() || !(0.0..=1.0).contains(&speed) {
            return Err(FlowError::ParamOutOfRange {
                name: "speed",
                value: speed,
                min: 0.0,
                max: 1.0,
            });
        }
        self.values.speed = speed;
        self.commit(ParamKey::Speed);
        Ok(())
    }

    /// Particle count is capped at [`NUM_PARTICLES_MAX`].
    pub fn set_num_particles(&mut self, count: usize) -> Result<(), FlowError> {
        if count > NUM_PARTICLES_MAX {
            return Err(FlowError::ParamOutOfRange {
                name: "num_particles",
                value: count as f64,
                min: 0.0,
                max: NUM_PARTICLES_MAX as f64,
            });
        }
        self.values.num_particles = count;
        self.commit(ParamKey::NumParticles);
        Ok(())
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.values.background = color;
        self.commit(ParamKey::Background);
    }

    pub fn set_draw_opacity(&mut self, alpha: u8) {
        self.values.draw_opacity = alpha;
        self.commit(ParamKey::DrawOpacity);
    }

    pub fn set_curve(&mut self, curve: Curve) {
        self.values.curve = curve;
        self.commit(ParamKey::Curve);
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.values.color_mode = mode;
        self.commit(ParamKey::ColorMode);
    }

    /// The map must compile as a gradient (non-empty, positive weights).
    pub fn set_color_map(&mut self, map: Vec<GradientStop>) -> Result<(), FlowError> {
        CyclicGradient::build(&map)?;
        self.values.color_map = map;
        self.commit(ParamKey::ColorMap);
        Ok(())
    }
}
