#![deny(unsafe_code)]
//! Particle system, app lifecycle, and CPU rasterizer for the flowfield
//! engine.
//!
//! [`App`] is the piece a frame driver talks to: it owns the parameter store
//! and the particle system, snapshots parameters once per frame, and emits
//! [`DrawList`]s. Everything is single-threaded and fully synchronous — the
//! driver cancels by simply not calling [`App::frame`] again.

pub mod particles;
pub mod raster;

pub use particles::ParticleSystem;
pub use raster::Raster;

use flowfield_core::context::{FrameContext, FrameTiming, SurfaceSize};
use flowfield_core::draw::DrawList;
use flowfield_core::error::FlowError;
use flowfield_core::params::{ParamKey, ParamStore};
use std::cell::Cell;
use std::rc::Rc;

/// The frame-driven application: parameter store + particle system.
///
/// Lifecycle: [`App::new`] (init), [`App::resize`] on surface changes,
/// [`App::frame`] once per animation frame.
pub struct App {
    store: ParamStore,
    surface: SurfaceSize,
    system: ParticleSystem,
    /// Set by the background/draw-opacity listener; the next frame opens
    /// with a full clear instead of the usual translucent fade.
    clear_requested: Rc<Cell<bool>>,
}

impl App {
    /// Builds the app and wires the clear-on-change listener for the
    /// background and draw-opacity parameters.
    pub fn new(mut store: ParamStore, surface: SurfaceSize, seed: u64) -> Self {
        let clear_requested = Rc::new(Cell::new(false));
        let flag = Rc::clone(&clear_requested);
        store.subscribe(&[ParamKey::Background, ParamKey::DrawOpacity], move |_| {
            flag.set(true);
        });

        let system = ParticleSystem::new(surface, store.values().num_particles, seed);
        Self {
            store,
            surface,
            system,
            clear_requested,
        }
    }

    /// The parameter store, for the driver's configuration surface.
    pub fn params(&self) -> &ParamStore {
        &self.store
    }

    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.store
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// The full-surface clear the driver applies once at startup.
    pub fn initial_clear(&self) -> DrawList {
        let mut list = DrawList::new();
        list.fade(self.store.values().background, 255);
        list
    }

    /// Adopts new surface bounds: every particle respawns and the caller
    /// gets a full clear for the resized surface.
    pub fn resize(&mut self, surface: SurfaceSize) -> DrawList {
        self.surface = surface;
        self.system.respawn_all(surface);
        self.initial_clear()
    }

    /// Runs one frame against a consistent parameter snapshot.
    pub fn frame(&mut self, timing: FrameTiming) -> Result<DrawList, FlowError> {
        let ctx = FrameContext::new(self.surface, timing, self.store.snapshot());
        let frame_list = self.system.frame(&ctx)?;

        if self.clear_requested.replace(false) {
            // Committed background/opacity changes clear the surface before
            // this frame's output.
            let mut cleared = self.initial_clear();
            for op in frame_list.into_ops() {
                cleared.push(op);
            }
            return Ok(cleared);
        }
        Ok(frame_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::color::Rgb;
    use flowfield_core::draw::DrawOp;

    const DELTA: f64 = 1.0 / 60.0;

    fn surface() -> SurfaceSize {
        SurfaceSize::new(640.0, 480.0).unwrap()
    }

    fn app() -> App {
        let mut store = ParamStore::new();
        store.set_num_particles(20).unwrap();
        App::new(store, surface(), 42)
    }

    #[test]
    fn new_spawns_the_configured_particle_count() {
        let app = app();
        assert_eq!(app.system().len(), 20);
    }

    #[test]
    fn initial_clear_is_a_full_alpha_background_fade() {
        let app = app();
        let list = app.initial_clear();
        assert_eq!(
            list.ops(),
            &[DrawOp::Fade {
                color: Rgb::WHITE,
                alpha: 255
            }]
        );
    }

    #[test]
    fn frame_emits_the_translucent_fade_by_default() {
        let mut app = app();
        let list = app.frame(FrameTiming::new(0.0, DELTA)).unwrap();
        assert!(matches!(list.ops()[0], DrawOp::Fade { alpha: 13, .. }));
    }

    #[test]
    fn background_commit_triggers_a_full_clear_on_the_next_frame() {
        let mut app = app();
        app.frame(FrameTiming::new(0.0, DELTA)).unwrap();

        let navy = Rgb::from_hex("001f3f").unwrap();
        app.params_mut().set_background(navy);

        let list = app.frame(FrameTiming::new(DELTA, DELTA)).unwrap();
        assert_eq!(
            list.ops()[0],
            DrawOp::Fade {
                color: navy,
                alpha: 255
            },
            "expected a full clear first"
        );
        assert!(
            matches!(list.ops()[1], DrawOp::Fade { alpha: 13, .. }),
            "normal fade follows the clear"
        );

        // The request is one-shot.
        let next = app.frame(FrameTiming::new(2.0 * DELTA, DELTA)).unwrap();
        assert!(matches!(next.ops()[0], DrawOp::Fade { alpha: 13, .. }));
    }

    #[test]
    fn draw_opacity_commit_also_triggers_the_clear() {
        let mut app = app();
        app.params_mut().set_draw_opacity(40);
        let list = app.frame(FrameTiming::new(0.0, DELTA)).unwrap();
        assert!(matches!(list.ops()[0], DrawOp::Fade { alpha: 255, .. }));
    }

    #[test]
    fn unrelated_commits_do_not_clear() {
        let mut app = app();
        app.params_mut().set_speed(0.8).unwrap();
        let list = app.frame(FrameTiming::new(0.0, DELTA)).unwrap();
        assert!(matches!(list.ops()[0], DrawOp::Fade { alpha: 13, .. }));
    }

    #[test]
    fn resize_respawns_every_particle_and_clears() {
        let mut app = app();
        let before: Vec<_> = app.system().positions().to_vec();

        let bigger = SurfaceSize::new(1280.0, 960.0).unwrap();
        let list = app.resize(bigger);

        assert!(matches!(list.ops()[0], DrawOp::Fade { alpha: 255, .. }));
        assert_eq!(app.system().len(), before.len());
        assert_eq!(app.surface(), bigger);
        for (&now, &was) in app.system().positions().iter().zip(&before) {
            assert_ne!(now, was, "particle kept its pre-resize position");
            assert!(bigger.contains(now));
        }
    }
}

