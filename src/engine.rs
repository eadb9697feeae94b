use crate::{
    core::{TickIndex, Vec2, Viewport},
    crossfade::{self, CrossfadeController},
    error::{SceneError, SceneResult},
    render::{ShapeHandle, ShapeRenderer},
    scroll::{FrameCoalescer, scroll_progress},
    section::{SectionRect, SectionTracker, locate_current},
    shape::{CornerSlot, ShapeTable},
    theme::{Theme, ThemeMachine, ThemeSchedule},
};

const CAMERA_SCROLL_RATE: f64 = 0.008;
const CAMERA_POINTER_RATE: f64 = 0.5;
const CAMERA_YAW_RATE: f64 = 0.05;

#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub theme_schedule: ThemeSchedule,
    pub crossfade_step: f64,
    /// Inset of the corner anchors from the viewport edges, in pixels.
    pub shape_margin: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            theme_schedule: ThemeSchedule::default(),
            crossfade_step: crossfade::DEFAULT_STEP,
            shape_margin: 120.0,
        }
    }
}

/// Per-frame environment reading: the live document geometry the host
/// samples from its page. Sections are viewport-relative and in fixed page
/// order; an empty list disables section-driven retargeting without error.
#[derive(Clone, Debug, Default)]
pub struct FrameEnv {
    pub document_height: f64,
    pub sections: Vec<SectionRect>,
}

/// Cosmetic parallax offsets the host applies to its camera.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraRig {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

/// What one frame computed, for hosts that mirror state elsewhere.
#[derive(Clone, Copy, Debug)]
pub struct FrameReport {
    pub progress: f64,
    pub theme: Theme,
    pub theme_changed: bool,
    pub section: Option<usize>,
    pub camera: CameraRig,
    pub settled: bool,
}

#[derive(Clone, Copy, Debug)]
struct SlotHandles {
    outgoing: ShapeHandle,
    incoming: Option<ShapeHandle>,
}

/// The one context object threading scroll input through the theme machine,
/// section locator, and cross-fade controller, and pushing the results into
/// the renderer. Constructed once at startup; all mutation happens inside
/// [`SceneEngine::frame`] on the host's single execution context.
pub struct SceneEngine<R: ShapeRenderer> {
    config: SceneConfig,
    table: ShapeTable,
    renderer: R,
    viewport: Viewport,
    coalescer: FrameCoalescer,
    theme: ThemeMachine,
    tracker: SectionTracker,
    controller: CrossfadeController,
    slots: [SlotHandles; 4],
    scroll_offset: f64,
    pointer: Vec2,
    progress: f64,
    torn_down: bool,
}

impl<R: ShapeRenderer> SceneEngine<R> {
    pub fn new(
        config: SceneConfig,
        table: ShapeTable,
        viewport: Viewport,
        mut renderer: R,
    ) -> SceneResult<Self> {
        table.validate()?;
        let initial = table
            .shapes_for(0)
            .ok_or_else(|| SceneError::validation("shape table has no first section"))?;

        let theme = ThemeMachine::new(config.theme_schedule);

        // Initial theme is applied once, before the first scroll sample.
        let palette = theme.current().palette();
        renderer.set_clear_color(palette.background)?;

        let mut slots = Vec::with_capacity(CornerSlot::COUNT);
        for (slot, kind) in CornerSlot::ALL.into_iter().zip(initial) {
            let anchor = slot.anchor(viewport, config.shape_margin);
            let handle = renderer.create(kind, anchor)?;
            renderer.set_color(handle, palette.foreground)?;
            slots.push(SlotHandles {
                outgoing: handle,
                incoming: None,
            });
        }
        let slots: [SlotHandles; 4] = slots
            .try_into()
            .map_err(|_| SceneError::render("expected exactly 4 corner slots"))?;

        Ok(Self {
            controller: CrossfadeController::new(initial, config.crossfade_step),
            config,
            table,
            renderer,
            viewport,
            coalescer: FrameCoalescer::new(),
            theme,
            tracker: SectionTracker::new(),
            slots,
            scroll_offset: 0.0,
            pointer: Vec2::ZERO,
            progress: 0.0,
            torn_down: false,
        })
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Scroll listener. Returns `true` when the host should schedule a frame
    /// (first event since the last rendered one).
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.scroll_offset = offset.max(0.0);
        self.coalescer.request()
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        self.coalescer.request()
    }

    /// Pointer listener; coordinates in viewport pixels.
    pub fn on_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Vec2::new(
            (x / self.viewport.width - 0.5) * CAMERA_POINTER_RATE,
            (y / self.viewport.height - 0.5) * CAMERA_POINTER_RATE,
        );
        // Pointer motion is cosmetic; the per-frame redraw picks it up
        // without forcing a scroll-state recompute.
    }

    /// Per-frame tick. Scroll-derived state (progress, theme, section) is
    /// recomputed at most once per call no matter how many input events
    /// landed since the last one; the render pass always runs.
    #[tracing::instrument(skip(self, env), fields(tick = tick.0))]
    pub fn frame(&mut self, tick: TickIndex, env: &FrameEnv) -> SceneResult<FrameReport> {
        if self.torn_down {
            return Err(SceneError::render("frame after teardown"));
        }

        let mut theme_changed = false;
        if self.coalescer.take() {
            self.progress =
                scroll_progress(self.scroll_offset, env.document_height, self.viewport.height);

            if let Some(change) = self.theme.update(self.progress) {
                theme_changed = true;
                self.apply_theme(change.to)?;
            }

            let located = locate_current(&env.sections, self.viewport);
            if let Some(section) = self.tracker.observe(located)
                && let Some(targets) = self.table.shapes_for(section)
            {
                self.retarget(targets)?;
            }
        }

        self.advance()?;
        self.draw(tick)?;

        Ok(FrameReport {
            progress: self.progress,
            theme: self.theme.current(),
            theme_changed,
            section: self.tracker.current(),
            camera: self.camera(),
            settled: self.controller.is_settled(),
        })
    }

    /// Release every renderer resource the engine created. Idempotent; the
    /// engine is unusable afterwards.
    pub fn teardown(&mut self) -> SceneResult<()> {
        if self.torn_down {
            return Ok(());
        }
        self.torn_down = true;
        for slot in &mut self.slots {
            self.renderer.dispose(slot.outgoing)?;
            if let Some(incoming) = slot.incoming.take() {
                self.renderer.dispose(incoming)?;
            }
        }
        Ok(())
    }

    fn camera(&self) -> CameraRig {
        CameraRig {
            x: self.pointer.x * CAMERA_POINTER_RATE,
            y: self.scroll_offset * CAMERA_SCROLL_RATE,
            yaw: self.pointer.x * CAMERA_YAW_RATE,
        }
    }

    fn apply_theme(&mut self, theme: Theme) -> SceneResult<()> {
        let palette = theme.palette();
        self.renderer.set_clear_color(palette.background)?;
        for slot in &self.slots {
            self.renderer.set_color(slot.outgoing, palette.foreground)?;
            if let Some(incoming) = slot.incoming {
                self.renderer.set_color(incoming, palette.foreground)?;
            }
        }
        Ok(())
    }

    /// Mirror a controller retarget into renderer handles: discarded
    /// incoming shapes are disposed immediately (they must never be drawn
    /// again), newly adopted targets get a fresh handle at the slot anchor.
    fn retarget(&mut self, targets: [crate::shape::ShapeKind; 4]) -> SceneResult<()> {
        let before = CornerSlot::ALL.map(|slot| self.controller.slot(slot).incoming);
        self.controller.retarget(targets);
        let palette = self.theme.current().palette();

        for (index, corner) in CornerSlot::ALL.into_iter().enumerate() {
            let after = self.controller.slot(corner).incoming;
            if after == before[index] {
                continue;
            }
            if let Some(stale) = self.slots[index].incoming.take() {
                self.renderer.dispose(stale)?;
            }
            if let Some(kind) = after {
                let anchor = corner.anchor(self.viewport, self.config.shape_margin);
                let handle = self.renderer.create(kind, anchor)?;
                self.renderer.set_color(handle, palette.foreground)?;
                self.slots[index].incoming = Some(handle);
            }
        }
        Ok(())
    }

    /// Advance cross-fades one tick and swap handles for slots that
    /// completed: the outgoing shape is disposed, the incoming handle
    /// becomes the visible one.
    fn advance(&mut self) -> SceneResult<()> {
        let in_flight = CornerSlot::ALL.map(|slot| !self.controller.slot(slot).is_idle());
        self.controller.tick();

        for (index, corner) in CornerSlot::ALL.into_iter().enumerate() {
            if in_flight[index] && self.controller.slot(corner).is_idle() {
                let Some(incoming) = self.slots[index].incoming.take() else {
                    return Err(SceneError::render("completed slot had no incoming handle"));
                };
                self.renderer.dispose(self.slots[index].outgoing)?;
                self.slots[index].outgoing = incoming;
            }
        }
        Ok(())
    }

    fn draw(&mut self, tick: TickIndex) -> SceneResult<()> {
        let theme = self.theme.current();
        for (index, corner) in CornerSlot::ALL.into_iter().enumerate() {
            let blend = self.controller.blend(corner, theme);
            let drift = self.controller.drift(corner, tick.0);
            let handles = self.slots[index];

            self.renderer.set_opacity(handles.outgoing, blend.outgoing.1)?;
            self.renderer
                .set_transform(handles.outgoing, drift.rotation, drift.float_offset)?;

            if let (Some(handle), Some((_, opacity))) = (handles.incoming, blend.incoming) {
                self.renderer.set_opacity(handle, opacity)?;
                self.renderer
                    .set_transform(handle, drift.rotation, drift.float_offset)?;
            }
        }
        Ok(())
    }
}

impl<R: ShapeRenderer> Drop for SceneEngine<R> {
    fn drop(&mut self) {
        // Best-effort release; hosts that care about dispose errors call
        // teardown() themselves first.
        let _ = self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, RenderCall};

    fn engine() -> SceneEngine<RecordingRenderer> {
        SceneEngine::new(
            SceneConfig::default(),
            ShapeTable::portfolio(),
            Viewport::new(1280.0, 800.0).unwrap(),
            RecordingRenderer::new(),
        )
        .unwrap()
    }

    fn env_with_section_centered(section: usize) -> FrameEnv {
        // Seven 800px sections stacked; shift so `section` is centered.
        let sections = (0..7)
            .map(|i| SectionRect {
                top: (i as f64 - section as f64) * 800.0,
                height: 800.0,
            })
            .collect();
        FrameEnv {
            document_height: 5600.0,
            sections,
        }
    }

    #[test]
    fn initial_theme_is_applied_before_first_sample() {
        let e = engine();
        assert_eq!(e.theme(), Theme::Light);
        assert!(
            e.renderer()
                .calls
                .iter()
                .any(|c| matches!(c, RenderCall::SetClearColor(c) if *c == crate::core::Rgb8::WHITE))
        );
        assert_eq!(e.renderer().live_handles(), 4);
    }

    #[test]
    fn scroll_past_midpoint_flips_theme_once() {
        let mut e = engine();
        let env = env_with_section_centered(0);

        e.on_scroll(0.0);
        let report = e.frame(TickIndex(0), &env).unwrap();
        assert!(!report.theme_changed);
        assert_eq!(report.theme, Theme::Light);

        // Past the midpoint of the 4800px scrollable range.
        e.on_scroll(3000.0);
        let report = e.frame(TickIndex(1), &env).unwrap();
        assert!(report.theme_changed);
        assert_eq!(report.theme, Theme::Dark);

        // Same offset again: coalesced recompute, no duplicate transition.
        e.on_scroll(3000.0);
        let report = e.frame(TickIndex(2), &env).unwrap();
        assert!(!report.theme_changed);
    }

    #[test]
    fn frame_without_events_skips_scroll_recompute_but_still_draws() {
        let mut e = engine();
        let env = env_with_section_centered(0);
        e.on_scroll(0.0);
        e.frame(TickIndex(0), &env).unwrap();
        let calls_before = e.renderer().calls.len();
        e.frame(TickIndex(1), &env).unwrap();
        // Still drew opacities/transforms for 4 slots.
        assert!(e.renderer().calls.len() >= calls_before + 8);
    }

    #[test]
    fn section_change_starts_crossfades_and_swaps_handles() {
        let mut e = engine();

        e.on_scroll(0.0);
        e.frame(TickIndex(0), &env_with_section_centered(0)).unwrap();
        assert_eq!(e.renderer().live_handles(), 4);

        // Section 1 comes into view; differing slots grow incoming handles.
        e.on_scroll(800.0);
        e.frame(TickIndex(1), &env_with_section_centered(1)).unwrap();
        assert_eq!(e.renderer().live_handles(), 8);

        // Run the fade to completion: outgoing handles get disposed.
        let env = env_with_section_centered(1);
        let mut tick = 2;
        for _ in 0..60 {
            e.frame(TickIndex(tick), &env).unwrap();
            tick += 1;
        }
        assert_eq!(e.renderer().live_handles(), 4);

        let about = ShapeTable::portfolio().shapes_for(1).unwrap();
        let live = CornerSlot::ALL.map(|slot| e.controller.slot(slot).current);
        assert_eq!(live, about);
    }

    #[test]
    fn retrigger_disposes_discarded_incoming_handle() {
        let mut e = engine();
        e.on_scroll(0.0);
        e.frame(TickIndex(0), &env_with_section_centered(0)).unwrap();

        e.on_scroll(800.0);
        e.frame(TickIndex(1), &env_with_section_centered(1)).unwrap();
        let live_mid = e.renderer().live_handles();
        assert_eq!(live_mid, 8);

        // Jump straight to section 2 mid-fade: stale incoming handles are
        // disposed, fresh ones created, never more than 8 live.
        e.on_scroll(1600.0);
        e.frame(TickIndex(2), &env_with_section_centered(2)).unwrap();
        assert!(e.renderer().live_handles() <= 8);
    }

    #[test]
    fn empty_sections_degrade_gracefully() {
        let mut e = engine();
        let env = FrameEnv {
            document_height: 5600.0,
            sections: Vec::new(),
        };
        e.on_scroll(500.0);
        let report = e.frame(TickIndex(0), &env).unwrap();
        assert_eq!(report.section, None);
        assert!(report.settled);
    }

    #[test]
    fn teardown_disposes_everything_and_is_idempotent() {
        let mut e = engine();
        e.on_scroll(800.0);
        e.frame(TickIndex(0), &env_with_section_centered(1)).unwrap();
        assert!(e.renderer().live_handles() > 0);

        e.teardown().unwrap();
        assert_eq!(e.renderer().live_handles(), 0);
        e.teardown().unwrap();
        assert!(e.frame(TickIndex(1), &env_with_section_centered(1)).is_err());
    }

    #[test]
    fn camera_tracks_scroll_and_pointer() {
        let mut e = engine();
        let env = env_with_section_centered(0);
        e.on_scroll(1000.0);
        e.on_pointer(1280.0, 400.0); // right edge, vertical center
        let report = e.frame(TickIndex(0), &env).unwrap();
        assert!((report.camera.y - 8.0).abs() < 1e-9);
        assert!(report.camera.x > 0.0);
        assert!(report.camera.yaw > 0.0);
    }
}
