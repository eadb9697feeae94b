use crate::{
    ease::Ease,
    shape::{CornerSlot, ShapeKind},
    theme::Theme,
};

/// Progress added per animation tick while a slot is transitioning.
/// Constant-rate: animation frames are assumed roughly uniform.
pub const DEFAULT_STEP: f64 = 0.02;

const ROTATION_RATES: [f64; 4] = [0.002, 0.001, 0.003, 0.0015];
const FLOAT_AMPLITUDE: f64 = 6.0;
const FLOAT_FREQUENCY: f64 = 0.02;

/// Interpolation state of one corner slot.
///
/// Idle: progress pinned at 1, no incoming kind. Transitioning: progress in
/// [0, 1), `incoming` set; the outgoing kind keeps rendering while the
/// incoming one fades in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotState {
    pub current: ShapeKind,
    pub incoming: Option<ShapeKind>,
    pub progress: f64,
}

impl SlotState {
    fn idle(kind: ShapeKind) -> Self {
        Self {
            current: kind,
            incoming: None,
            progress: 1.0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.incoming.is_none()
    }
}

/// What a slot should draw this frame: the outgoing shape, and the incoming
/// one while a cross-fade is in flight. Opacities already include the
/// theme's base opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotBlend {
    pub outgoing: (ShapeKind, f64),
    pub incoming: Option<(ShapeKind, f64)>,
}

/// Bounded cosmetic motion applied to every visible shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotDrift {
    pub rotation: f64,
    pub float_offset: f64,
}

/// Cross-fade state machine over the 4 corner slots, each independent.
///
/// Owns all transition state exclusively; the renderer only reads the
/// per-frame [`SlotBlend`] values.
#[derive(Clone, Debug)]
pub struct CrossfadeController {
    slots: [SlotState; 4],
    step: f64,
    ease: Ease,
}

impl CrossfadeController {
    pub fn new(initial: [ShapeKind; 4], step: f64) -> Self {
        Self {
            slots: initial.map(SlotState::idle),
            step: step.clamp(f64::MIN_POSITIVE, 1.0),
            ease: Ease::InOutCubic,
        }
    }

    pub fn slot(&self, slot: CornerSlot) -> &SlotState {
        &self.slots[slot.index()]
    }

    pub fn is_settled(&self) -> bool {
        self.slots.iter().all(SlotState::is_idle)
    }

    /// Point every slot at the shapes of the newly active section.
    ///
    /// Slots already showing (or already fading toward) the right kind are
    /// untouched. A slot re-triggered mid-transition adopts the new target
    /// immediately, restarting at progress 0 and discarding the in-flight
    /// interpolation; the previously-incoming shape is never rendered again.
    /// Adopting instead of queueing is what keeps a fast scroller from
    /// stacking up stale partial states.
    pub fn retarget(&mut self, targets: [ShapeKind; 4]) {
        for (slot, target) in self.slots.iter_mut().zip(targets) {
            if slot.incoming == Some(target) {
                continue;
            }
            if slot.current == target {
                // Reverting to the still-visible kind cancels any fade
                // outright instead of cross-fading a shape into itself.
                slot.incoming = None;
                slot.progress = 1.0;
                continue;
            }
            slot.incoming = Some(target);
            slot.progress = 0.0;
        }
        tracing::trace!(?targets, "slots retargeted");
    }

    /// Advance every transitioning slot by one tick. On reaching progress 1
    /// the incoming kind becomes current and the slot returns to idle.
    pub fn tick(&mut self) {
        for slot in &mut self.slots {
            let Some(incoming) = slot.incoming else {
                continue;
            };
            slot.progress = (slot.progress + self.step).min(1.0);
            if slot.progress >= 1.0 {
                slot.current = incoming;
                slot.incoming = None;
                slot.progress = 1.0;
            }
        }
    }

    /// Current visuals for one slot under the active theme.
    pub fn blend(&self, slot: CornerSlot, theme: Theme) -> SlotBlend {
        let state = &self.slots[slot.index()];
        let base = theme.shape_opacity();
        match state.incoming {
            None => SlotBlend {
                outgoing: (state.current, base),
                incoming: None,
            },
            Some(incoming) => {
                let eased = self.ease.apply(state.progress);
                SlotBlend {
                    outgoing: (state.current, base * (1.0 - eased)),
                    incoming: Some((incoming, base * eased)),
                }
            }
        }
    }

    /// Cosmetic rotation and vertical float for a slot at the given tick.
    /// Pure function of elapsed ticks and slot index, so the oscillation is
    /// bounded and nothing accumulates.
    pub fn drift(&self, slot: CornerSlot, ticks: u64) -> SlotDrift {
        let t = ticks as f64;
        let index = slot.index();
        let phase = index as f64 * std::f64::consts::FRAC_PI_2;
        SlotDrift {
            rotation: t * ROTATION_RATES[index],
            float_offset: FLOAT_AMPLITUDE * (t * FLOAT_FREQUENCY + phase).sin(),
        }
    }
}
