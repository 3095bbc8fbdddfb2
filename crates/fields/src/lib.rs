#![deny(unsafe_code)]
//! The seven flow-field generators and the [`FieldKind`] registry.
//!
//! Each field is an immutable per-frame instance: its constructor reads the
//! [`FrameContext`] snapshot once, precomputing every time-, size-, and
//! speed-derived constant, and its evaluation methods are pure. Building the
//! instance before the particle pass is what guarantees that all particles
//! in one frame see the same field even if parameters commit mid-frame.
//!
//! All fields are deterministic: same context and position, same velocity.

use flowfield_core::context::FrameContext;
use flowfield_core::field::{wrap_percent, Curve, FlowField};
use flowfield_core::vec2::{angle_of, map};
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// (1 + √5) / 2, the anisotropy ratio of the vortex ellipse.
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Number of bands in the eyes field's vertical blend ramp.
const EYE_BLEND_BANDS: f64 = 3.0;

// ---------------------------------------------------------------------------
// Field instances
// ---------------------------------------------------------------------------

/// Swirl around the surface center: velocity phase follows the angle to
/// center minus a stepped time offset, with golden-ratio anisotropy between
/// the axes, so the rotation traces an ellipse-like path.
pub struct VortexField {
    center: DVec2,
    stepped_time: f64,
    multiplier: f64,
    delta: f64,
}

/// Near-uniform horizontal drift whose angle oscillates as the cosine of the
/// squared distance from the origin, creating wave bands.
pub struct SweepingRightField {
    magnitude: f64,
    divisor: f64,
    width: f64,
}

/// Constant horizontal velocity with the vertical component alternating sign
/// on a position-modulo wave.
pub struct ZigZagField {
    scale: f64,
    width: f64,
}

/// Velocity angle derived from the angle to center, reflected into a
/// half-period band — field-line-like convergence and divergence.
pub struct MagnetField {
    center: DVec2,
    magnitude: f64,
    height: f64,
}

/// Uniform grid of cells, each imposing a local rotation whose direction
/// alternates with the parity of the cell-index sum: a checkerboard of
/// counter-rotating vortices.
pub struct SwirlsField {
    cell: f64,
    per_axis: DVec2,
    max_index: f64,
    magnitude: f64,
}

/// Two half-domains, each pulling flow upward with a horizontal bias that
/// flips across the midline, blended near the boundary band and bent toward
/// straight-down by a quadratic falloff from the vertical centerline.
pub struct EyesField {
    center: DVec2,
    magnitude: f64,
}

/// Velocity angle and magnitude from nested sine/cosine of scaled position:
/// flowing diagonal stripe bands.
pub struct CurvedStripesField {
    scale: f64,
    magnitude: f64,
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl VortexField {
    pub fn new(ctx: &FrameContext) -> Self {
        let elapsed = ctx.timing.elapsed;
        Self {
            center: ctx.surface.center(),
            stepped_time: 2.0 * elapsed - (elapsed / 8.0).floor(),
            multiplier: (ctx.params.speed + 0.05) * ctx.surface.min_dim() / 800.0,
            delta: ctx.timing.delta,
        }
    }
}

impl SweepingRightField {
    pub fn new(ctx: &FrameContext) -> Self {
        let band_scale = ctx.surface.min_dim() * 1.2;
        Self {
            magnitude: 500.0 * (ctx.params.speed + 0.1) * ctx.timing.delta,
            divisor: band_scale * band_scale / 2.0,
            width: ctx.surface.width(),
        }
    }
}

impl ZigZagField {
    pub fn new(ctx: &FrameContext) -> Self {
        Self {
            scale: ctx.params.speed * ctx.timing.delta * 300.0,
            width: ctx.surface.width(),
        }
    }
}

impl MagnetField {
    pub fn new(ctx: &FrameContext) -> Self {
        Self {
            center: ctx.surface.center(),
            magnitude: (ctx.params.speed + 0.05) * ctx.timing.delta * 200.0,
            height: ctx.surface.height(),
        }
    }
}

impl SwirlsField {
    pub fn new(ctx: &FrameContext) -> Self {
        let half = ctx.surface.center();
        let cell = half.min_element() / 2.0;
        let per_axis = map(half, |n| (n / cell).floor());
        Self {
            cell,
            per_axis,
            max_index: per_axis.x * per_axis.y,
            magnitude: (ctx.params.speed + 0.05) * ctx.timing.delta * 200.0,
        }
    }
}

impl EyesField {
    pub fn new(ctx: &FrameContext) -> Self {
        Self {
            center: ctx.surface.center(),
            magnitude: (ctx.params.speed + 0.05) * ctx.timing.delta * 200.0,
        }
    }
}

impl CurvedStripesField {
    pub fn new(ctx: &FrameContext) -> Self {
        Self {
            scale: ctx.surface.min_dim(),
            magnitude: (ctx.params.speed + 0.05) * ctx.timing.delta * 200.0,
        }
    }
}

// ---------------------------------------------------------------------------
// FlowField implementations
// ---------------------------------------------------------------------------

impl FlowField for VortexField {
    fn velocity_at(&self, position: DVec2) -> DVec2 {
        let diff = (position - self.center) / self.center;
        if diff == DVec2::ZERO {
            // The radial direction is undefined at the exact center; report
            // rest and let the stagnation check respawn the particle.
            return DVec2::ZERO;
        }
        let phase = angle_of(diff) - self.stepped_time;
        DVec2::new(
            GOLDEN_RATIO
                * self.multiplier
                * (diff.length() / (2.0 * self.delta) + phase).cos(),
            self.multiplier * (diff.length() / (2.0 * GOLDEN_RATIO * self.delta) + phase).sin(),
        )
    }

    fn colorizes(&self) -> bool {
        true
    }

    fn color_sample_at(&self, velocity: DVec2, _position: DVec2) -> Option<f64> {
        Some(wrap_percent(angle_of(velocity) / TAU))
    }
}

impl FlowField for SweepingRightField {
    fn velocity_at(&self, position: DVec2) -> DVec2 {
        let angle = (position.length_squared() / self.divisor).cos();
        DVec2::from_angle(angle) * self.magnitude
    }

    fn colorizes(&self) -> bool {
        true
    }

    fn color_sample_at(&self, velocity: DVec2, position: DVec2) -> Option<f64> {
        Some(wrap_percent(
            position.x / self.width + angle_of(velocity) / TAU,
        ))
    }
}

impl FlowField for ZigZagField {
    fn velocity_at(&self, position: DVec2) -> DVec2 {
        let phase = (10.0 * position.x / self.width).rem_euclid(1.0);
        DVec2::new(1.0, 2.0 * (phase.round() - 0.5)) * self.scale
    }

    fn colorizes(&self) -> bool {
        true
    }

    fn color_sample_at(&self, velocity: DVec2, position: DVec2) -> Option<f64> {
        Some(wrap_percent(
            position.x / self.width + angle_of(velocity) / TAU,
        ))
    }
}

impl FlowField for MagnetField {
    fn velocity_at(&self, position: DVec2) -> DVec2 {
        // Truncated remainder, sign-preserving: angles left of the band
        // fold differently from those right of it.
        let band = (angle_of(position - self.center) + FRAC_PI_2) % PI;
        DVec2::from_angle(band + band % PI) * self.magnitude
    }

    fn colorizes(&self) -> bool {
        true
    }

    fn color_sample_at(&self, velocity: DVec2, position: DVec2) -> Option<f64> {
        Some(wrap_percent(
            position.y / self.height + angle_of(velocity) / TAU,
        ))
    }
}

impl FlowField for SwirlsField {
    fn velocity_at(&self, position: DVec2) -> DVec2 {
        let local = map(position, |n| n.rem_euclid(self.cell) - self.cell / 2.0);
        let parity = map(position, |n| (n / self.cell).floor()).element_sum() % 2.0;
        let turn = if parity == 1.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        DVec2::from_angle(angle_of(local) + turn) * self.magnitude
    }

    fn colorizes(&self) -> bool {
        true
    }

    fn color_sample_at(&self, _velocity: DVec2, position: DVec2) -> Option<f64> {
        let idx = map(position, |n| (n / self.cell).floor());
        let flat = idx.x + idx.y * self.per_axis.x;
        // Half the unit interval spreads neighboring cells across distinct
        // hues without wrapping back onto themselves.
        Some(wrap_percent(flat / self.max_index / 2.0))
    }
}

impl FlowField for EyesField {
    fn velocity_at(&self, position: DVec2) -> DVec2 {
        let inward = if position.x < self.center.x { 1.0 } else { -1.0 };
        let start = DVec2::new(inward, -1.0);
        let end = DVec2::new(-inward, -1.0);
        let band = ((position.y / self.center.y / 2.0) * EYE_BLEND_BANDS
            - (EYE_BLEND_BANDS - 1.0) / 2.0)
            .clamp(0.0, 1.0);
        let toward_down = (1.0 - (position.x / self.center.x - 1.0).abs()).powi(2);
        start
            .lerp(end, band)
            .normalize_or_zero()
            .lerp(DVec2::new(0.0, 1.0), toward_down)
            * self.magnitude
    }

    fn colorizes(&self) -> bool {
        true
    }

    fn color_sample_at(&self, velocity: DVec2, position: DVec2) -> Option<f64> {
        let turn = angle_of(velocity) / TAU;
        Some(wrap_percent(if position.x < self.center.x {
            turn
        } else {
            0.5 - turn
        }))
    }
}

impl FlowField for CurvedStripesField {
    fn velocity_at(&self, position: DVec2) -> DVec2 {
        let u = position.x / self.scale;
        let v = position.y / self.scale;
        let angle = FRAC_PI_4 + (4.0 * (u + v) + (4.0 * (u - v)).sin()).cos();
        let magnitude = self.magnitude * (0.75 + 0.25 * (4.0 * (u + v)).sin());
        DVec2::from_angle(angle) * magnitude
    }

    fn colorizes(&self) -> bool {
        true
    }

    fn color_sample_at(&self, velocity: DVec2, position: DVec2) -> Option<f64> {
        let diagonal = (position.x + position.y) / (2.0 * self.scale);
        Some(wrap_percent(diagonal + angle_of(velocity) / TAU))
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Tagged union of every field instance, built from a [`Curve`] selection.
///
/// Dispatch is exhaustive: adding a curve without extending every match here
/// is a compile error.
pub enum FieldKind {
    Vortex(VortexField),
    SweepingRight(SweepingRightField),
    ZigZag(ZigZagField),
    Magnet(MagnetField),
    Swirls(SwirlsField),
    Eyes(EyesField),
    CurvedStripes(CurvedStripesField),
}

impl FieldKind {
    /// Builds the field instance for `curve` from this frame's context.
    pub fn build(curve: Curve, ctx: &FrameContext) -> Self {
        match curve {
            Curve::Vortex => FieldKind::Vortex(VortexField::new(ctx)),
            Curve::SweepingRight => FieldKind::SweepingRight(SweepingRightField::new(ctx)),
            Curve::ZigZag => FieldKind::ZigZag(ZigZagField::new(ctx)),
            Curve::Magnet => FieldKind::Magnet(MagnetField::new(ctx)),
            Curve::Swirls => FieldKind::Swirls(SwirlsField::new(ctx)),
            Curve::Eyes => FieldKind::Eyes(EyesField::new(ctx)),
            Curve::CurvedStripes => FieldKind::CurvedStripes(CurvedStripesField::new(ctx)),
        }
    }

    /// Display names of every curve, in selection-menu order.
    pub fn list_curves() -> Vec<&'static str> {
        Curve::ALL.into_iter().map(Curve::name).collect()
    }
}

impl FlowField for FieldKind {
    fn colorizes(&self) -> bool {
        match self {
            FieldKind::Vortex(f) => f.colorizes(),
            FieldKind::SweepingRight(f) => f.colorizes(),
            FieldKind::ZigZag(f) => f.colorizes(),
            FieldKind::Magnet(f) => f.colorizes(),
            FieldKind::Swirls(f) => f.colorizes(),
            FieldKind::Eyes(f) => f.colorizes(),
            FieldKind::CurvedStripes(f) => f.colorizes(),
        }
    }

    fn velocity_at(&self, position: DVec2) -> DVec2 {
        match self {
            FieldKind::Vortex(f) => f.velocity_at(position),
            FieldKind::SweepingRight(f) => f.velocity_at(position),
            FieldKind::ZigZag(f) => f.velocity_at(position),
            FieldKind::Magnet(f) => f.velocity_at(position),
            FieldKind::Swirls(f) => f.velocity_at(position),
            FieldKind::Eyes(f) => f.velocity_at(position),
            FieldKind::CurvedStripes(f) => f.velocity_at(position),
        }
    }

    fn color_sample_at(&self, velocity: DVec2, position: DVec2) -> Option<f64> {
        match self {
            FieldKind::Vortex(f) => f.color_sample_at(velocity, position),
            FieldKind::SweepingRight(f) => f.color_sample_at(velocity, position),
            FieldKind::ZigZag(f) => f.color_sample_at(velocity, position),
            FieldKind::Magnet(f) => f.color_sample_at(velocity, position),
            FieldKind::Swirls(f) => f.color_sample_at(velocity, position),
            FieldKind::Eyes(f) => f.color_sample_at(velocity, position),
            FieldKind::CurvedStripes(f) => f.color_sample_at(velocity, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::context::{FrameTiming, SurfaceSize};
    use flowfield_core::params::ParamValues;

    const DELTA: f64 = 1.0 / 60.0;

    fn ctx() -> FrameContext {
        ctx_with_speed(0.5)
    }

    fn ctx_with_speed(speed: f64) -> FrameContext {
        FrameContext::new(
            SurfaceSize::new(800.0, 600.0).unwrap(),
            FrameTiming::new(1.0, DELTA),
            ParamValues {
                speed,
                ..ParamValues::default()
            },
        )
    }

    fn sample_points() -> Vec<DVec2> {
        vec![
            DVec2::new(1.0, 1.0),
            DVec2::new(400.0, 300.0),
            DVec2::new(799.0, 599.0),
            DVec2::new(123.4, 456.7),
            DVec2::new(650.0, 20.0),
        ]
    }

    // -- Registry --

    #[test]
    fn build_matches_every_curve_variant() {
        let ctx = ctx();
        for curve in Curve::ALL {
            let field = FieldKind::build(curve, &ctx);
            let matches = match (curve, &field) {
                (Curve::Vortex, FieldKind::Vortex(_)) => true,
                (Curve::SweepingRight, FieldKind::SweepingRight(_)) => true,
                (Curve::ZigZag, FieldKind::ZigZag(_)) => true,
                (Curve::Magnet, FieldKind::Magnet(_)) => true,
                (Curve::Swirls, FieldKind::Swirls(_)) => true,
                (Curve::Eyes, FieldKind::Eyes(_)) => true,
                (Curve::CurvedStripes, FieldKind::CurvedStripes(_)) => true,
                _ => false,
            };
            assert!(matches, "wrong variant for {curve}");
        }
    }

    #[test]
    fn list_curves_matches_the_enum() {
        let names = FieldKind::list_curves();
        assert_eq!(names.len(), Curve::ALL.len());
        assert!(names.contains(&"Vortex"));
        assert!(names.contains(&"Curved Stripes"));
    }

    #[test]
    fn every_field_produces_finite_velocities() {
        let ctx = ctx();
        for curve in Curve::ALL {
            let field = FieldKind::build(curve, &ctx);
            for p in sample_points() {
                let vel = field.velocity_at(p);
                assert!(vel.is_finite(), "{curve} produced {vel} at {p}");
            }
        }
    }

    #[test]
    fn every_field_exposes_a_color_sample_in_unit_range() {
        let ctx = ctx();
        for curve in Curve::ALL {
            let field = FieldKind::build(curve, &ctx);
            assert!(field.colorizes(), "{curve} should colorize");
            for p in sample_points() {
                let vel = field.velocity_at(p);
                let sample = field
                    .color_sample_at(vel, p)
                    .unwrap_or_else(|| panic!("{curve} has no color sample"));
                assert!(
                    (0.0..1.0).contains(&sample),
                    "{curve} sample {sample} at {p}"
                );
            }
        }
    }

    // -- Vortex --

    #[test]
    fn vortex_at_exact_center_reports_rest() {
        let ctx = ctx();
        let field = VortexField::new(&ctx);
        assert_eq!(field.velocity_at(ctx.surface.center()), DVec2::ZERO);
    }

    #[test]
    fn vortex_velocity_scales_with_speed() {
        let slow = VortexField::new(&ctx_with_speed(0.0));
        let fast = VortexField::new(&ctx_with_speed(1.0));
        let p = DVec2::new(600.0, 200.0);
        assert!(fast.velocity_at(p).length() > slow.velocity_at(p).length());
    }

    // -- Sweeping Right --

    #[test]
    fn sweeping_right_magnitude_is_position_invariant() {
        let ctx = ctx();
        let field = SweepingRightField::new(&ctx);
        let expected = 500.0 * (0.5 + 0.1) * DELTA;
        for p in sample_points() {
            let got = field.velocity_at(p).length();
            assert!(
                (got - expected).abs() < 1e-9,
                "magnitude {got} at {p}, expected {expected}"
            );
        }
    }

    #[test]
    fn sweeping_right_drifts_rightward_on_average() {
        let ctx = ctx();
        let field = SweepingRightField::new(&ctx);
        // cos of anything is in [-1, 1] radians, so x stays positive.
        for p in sample_points() {
            assert!(field.velocity_at(p).x > 0.0, "leftward drift at {p}");
        }
    }

    // -- Zig Zag --

    #[test]
    fn zig_zag_vertical_component_alternates_sign() {
        let ctx = ctx();
        let field = ZigZagField::new(&ctx);
        let scale = 0.5 * DELTA * 300.0;
        // Band width is width/10 = 80; phase flips across the half-band.
        let up = field.velocity_at(DVec2::new(10.0, 50.0));
        let down = field.velocity_at(DVec2::new(50.0, 50.0));
        assert!((up.x - scale).abs() < 1e-9);
        assert!((down.x - scale).abs() < 1e-9);
        assert!((up.y + scale).abs() < 1e-9, "expected -scale, got {}", up.y);
        assert!(
            (down.y - scale).abs() < 1e-9,
            "expected +scale, got {}",
            down.y
        );
    }

    #[test]
    fn zig_zag_is_still_at_zero_speed() {
        let field = ZigZagField::new(&ctx_with_speed(0.0));
        assert_eq!(field.velocity_at(DVec2::new(100.0, 100.0)), DVec2::ZERO);
    }

    // -- Magnet --

    #[test]
    fn magnet_magnitude_is_constant_everywhere() {
        let ctx = ctx();
        let field = MagnetField::new(&ctx);
        let expected = (0.5 + 0.05) * DELTA * 200.0;
        for p in sample_points() {
            let got = field.velocity_at(p).length();
            assert!((got - expected).abs() < 1e-9, "magnitude {got} at {p}");
        }
    }

    // -- Swirls --

    #[test]
    fn swirls_cell_size_is_a_quarter_of_min_dim() {
        let ctx = ctx();
        let field = SwirlsField::new(&ctx);
        assert!((field.cell - 150.0).abs() < 1e-9, "cell {}", field.cell);
    }

    #[test]
    fn swirls_adjacent_cells_counter_rotate() {
        let ctx = ctx();
        let field = SwirlsField::new(&ctx);
        // Same offset within two horizontally adjacent cells.
        let offset = DVec2::new(40.0, 70.0);
        let a = field.velocity_at(offset);
        let b = field.velocity_at(offset + DVec2::new(field.cell, 0.0));
        assert!(
            (a + b).length() < 1e-9,
            "expected opposite velocities, got {a} and {b}"
        );
    }

    #[test]
    fn swirls_color_sample_varies_across_cells() {
        let ctx = ctx();
        let field = SwirlsField::new(&ctx);
        let v = DVec2::ZERO;
        let a = field.color_sample_at(v, DVec2::new(10.0, 10.0)).unwrap();
        let b = field
            .color_sample_at(v, DVec2::new(10.0 + field.cell, 10.0))
            .unwrap();
        assert!((a - b).abs() > 1e-6, "same sample across cells: {a}");
    }

    // -- Eyes --

    #[test]
    fn eyes_flows_straight_down_on_the_vertical_centerline() {
        let ctx = ctx();
        let field = EyesField::new(&ctx);
        let vel = field.velocity_at(DVec2::new(400.0, 100.0));
        assert!(vel.x.abs() < 1e-9, "x component {}", vel.x);
        assert!(vel.y > 0.0, "expected downward flow, got {}", vel.y);
    }

    #[test]
    fn eyes_horizontal_bias_flips_across_the_midline() {
        let ctx = ctx();
        let field = EyesField::new(&ctx);
        // Near the top edge the blend band is clamped out and the sides are
        // barely bent downward, so the inward bias dominates.
        let left = field.velocity_at(DVec2::new(40.0, 10.0));
        let right = field.velocity_at(DVec2::new(760.0, 10.0));
        assert!(left.x > 0.0, "left half should bias inward: {left}");
        assert!(right.x < 0.0, "right half should bias inward: {right}");
    }

    // -- Curved Stripes --

    #[test]
    fn curved_stripes_magnitude_stays_within_its_band() {
        let ctx = ctx();
        let field = CurvedStripesField::new(&ctx);
        let base = (0.5 + 0.05) * DELTA * 200.0;
        for p in sample_points() {
            let got = field.velocity_at(p).length();
            assert!(
                got >= base * 0.5 - 1e-9 && got <= base + 1e-9,
                "magnitude {got} outside [{}, {base}] at {p}",
                base * 0.5
            );
        }
    }

    // -- Snapshot semantics --

    #[test]
    fn instances_capture_context_at_construction() {
        let mut ctx = ctx();
        let field = SweepingRightField::new(&ctx);
        let p = DVec2::new(200.0, 200.0);
        let before = field.velocity_at(p);
        // Mutating the context after construction must not affect the frame.
        ctx.params.speed = 1.0;
        assert_eq!(field.velocity_at(p), before);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn velocities_and_samples_are_total_in_bounds(
                x in 0.0_f64..800.0,
                y in 0.0_f64..600.0,
                speed in 0.0_f64..=1.0,
            ) {
                let ctx = ctx_with_speed(speed);
                let p = DVec2::new(x, y);
                for curve in Curve::ALL {
                    let field = FieldKind::build(curve, &ctx);
                    let vel = field.velocity_at(p);
                    prop_assert!(vel.is_finite(), "{curve} velocity {vel} at {p}");
                    if let Some(sample) = field.color_sample_at(vel, p) {
                        prop_assert!(
                            (0.0..1.0).contains(&sample),
                            "{curve} sample {sample} at {p}"
                        );
                    }
                }
            }

            #[test]
            fn magnet_reflects_into_a_half_period_band(
                x in 0.0_f64..800.0,
                y in 0.0_f64..600.0,
            ) {
                let ctx = ctx();
                let field = MagnetField::new(&ctx);
                let vel = field.velocity_at(DVec2::new(x, y));
                let expected = (0.5 + 0.05) * DELTA * 200.0;
                prop_assert!((vel.length() - expected).abs() < 1e-9);
            }
        }
    }
}
