//! The particle system: owns the live particle positions and runs the
//! per-frame pass.
//!
//! Each frame: fade the surface, reconcile the particle count, build the
//! active field once from the context snapshot, then advance or respawn
//! every particle and emit the draw instructions. The pass is total — after
//! the gradient compiles, nothing in it can fail, so one frame can never
//! corrupt the next frame's particle state.

use flowfield_core::color::{hue_cycle, Rgb};
use flowfield_core::context::{FrameContext, SurfaceSize};
use flowfield_core::draw::{DrawList, Segment};
use flowfield_core::error::FlowError;
use flowfield_core::field::FlowField;
use flowfield_core::gradient::CyclicGradient;
use flowfield_core::params::ColorMode;
use flowfield_core::prng::Xorshift64;
use flowfield_fields::FieldKind;
use glam::DVec2;

/// A particle whose squared speed falls below `STILL_THRESHOLD * delta` is
/// treated as effectively stopped and respawned.
const STILL_THRESHOLD: f64 = 0.01;

/// Owns the live set of particle positions plus the respawn PRNG.
pub struct ParticleSystem {
    particles: Vec<DVec2>,
    rng: Xorshift64,
}

impl ParticleSystem {
    /// Spawns `count` particles uniformly inside `surface`.
    pub fn new(surface: SurfaceSize, count: usize, seed: u64) -> Self {
        let mut rng = Xorshift64::new(seed);
        let particles = (0..count).map(|_| rng.next_point_in(surface)).collect();
        Self { particles, rng }
    }

    /// Builds a system from explicit positions (driver tests, replays).
    pub fn with_positions(particles: Vec<DVec2>, seed: u64) -> Self {
        Self {
            particles,
            rng: Xorshift64::new(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.particles
    }

    /// Teleports every particle to a fresh uniform position (surface resize).
    pub fn respawn_all(&mut self, surface: SurfaceSize) {
        let rng = &mut self.rng;
        for particle in &mut self.particles {
            *particle = rng.next_point_in(surface);
        }
    }

    /// Reconciles the live count with the desired count, preserving existing
    /// particles: shrinking drops the oldest (front) entries so the last
    /// `count` survive, growing appends freshly respawned particles.
    pub fn resize_to(&mut self, count: usize, surface: SurfaceSize) {
        if self.particles.len() > count {
            let excess = self.particles.len() - count;
            self.particles.drain(0..excess);
        } else {
            let rng = &mut self.rng;
            let missing = count - self.particles.len();
            self.particles
                .extend((0..missing).map(|_| rng.next_point_in(surface)));
        }
    }

    /// Runs one frame and returns its draw instructions.
    ///
    /// The only fallible step is compiling the configured gradient map, a
    /// configuration error surfaced before any particle moves.
    pub fn frame(&mut self, ctx: &FrameContext) -> Result<DrawList, FlowError> {
        let params = &ctx.params;
        let gradient = CyclicGradient::build(&params.color_map)?;
        let field = FieldKind::build(params.curve, ctx);

        let mut list = DrawList::new();
        list.fade(params.background, params.draw_opacity);

        self.resize_to(params.num_particles, ctx.surface);

        let multi_color = field.colorizes()
            && params.use_color
            && (params.color_mode == ColorMode::HueCycle
                || (params.color_mode == ColorMode::CustomGradient && gradient.len() > 1));
        let flat_color = if params.use_color && params.color_mode != ColorMode::Flat {
            gradient.first_color()
        } else {
            Rgb::BLACK
        };

        let mut batch = Vec::new();
        let rng = &mut self.rng;
        for particle in &mut self.particles {
            let velocity = field.velocity_at(*particle);

            let stagnant = velocity.length_squared() < STILL_THRESHOLD * ctx.timing.delta;
            if stagnant || !ctx.surface.contains(*particle) {
                // Teleport-respawn: no stroke this frame.
                *particle = rng.next_point_in(ctx.surface);
                continue;
            }

            let segment = Segment::new(*particle, *particle + velocity);
            *particle += velocity;

            if multi_color {
                let percent = field
                    .color_sample_at(velocity, segment.from)
                    .unwrap_or_default();
                let color = match params.color_mode {
                    ColorMode::HueCycle => hue_cycle(percent),
                    ColorMode::CustomGradient => gradient.sample(percent),
                    ColorMode::Flat => flat_color,
                };
                list.stroke(color, segment);
            } else {
                batch.push(segment);
            }
        }

        if !multi_color {
            list.batch(flat_color, batch);
        }
        Ok(list)
    }
}
