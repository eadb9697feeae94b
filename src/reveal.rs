use std::collections::HashMap;

use crate::{content::SectionId, core::Viewport, section::SectionRect};

/// Fraction of a section that must intersect the reveal window to count as
/// visible.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;
/// Inset subtracted from the viewport bottom when measuring visibility, so a
/// section only counts once it has cleared the lowest 100px of the screen.
pub const BOTTOM_MARGIN: f64 = 100.0;

/// Fraction of `rect` inside the viewport with the bottom margin excluded.
/// Viewport-relative coordinates, like [`locate_current`](crate::section::locate_current).
pub fn visible_fraction(rect: SectionRect, viewport: Viewport) -> f64 {
    if rect.height <= 0.0 {
        return 0.0;
    }
    let window_bottom = (viewport.height - BOTTOM_MARGIN).max(0.0);
    let top = rect.top.max(0.0);
    let bottom = (rect.top + rect.height).min(window_bottom);
    ((bottom - top).max(0.0) / rect.height).clamp(0.0, 1.0)
}

type Callback = Box<dyn FnOnce(SectionId) + Send>;

/// One-shot section-reveal subscriptions.
///
/// Each callback fires the first time its section becomes visible and is
/// unsubscribed automatically, so there is no per-section "already revealed"
/// flag for callers to maintain.
#[derive(Default)]
pub struct RevealObserver {
    pending: HashMap<usize, Vec<Callback>>,
}

impl RevealObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_visible(&mut self, section: SectionId, callback: impl FnOnce(SectionId) + Send + 'static) {
        self.pending
            .entry(section.index())
            .or_default()
            .push(Box::new(callback));
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    /// Measure each section against the margin-adjusted viewport and fire
    /// the callbacks of those crossing the visibility threshold. Sections
    /// are indexed in fixed page order, matching [`SectionId`].
    pub fn observe_frame(&mut self, sections: &[SectionRect], viewport: Viewport) {
        for (index, rect) in sections.iter().enumerate() {
            if visible_fraction(*rect, viewport) >= VISIBILITY_THRESHOLD {
                self.fire(index);
            }
        }
    }

    /// Feed pre-computed visible fractions (by section index) for this
    /// frame. Fires and drops the callbacks of every section at or above
    /// the visibility threshold.
    pub fn notify(&mut self, visible_fraction: &[f64]) {
        for (index, fraction) in visible_fraction.iter().enumerate() {
            if *fraction >= VISIBILITY_THRESHOLD {
                self.fire(index);
            }
        }
    }

    fn fire(&mut self, index: usize) {
        let Some(callbacks) = self.pending.remove(&index) else {
            return;
        };
        let Some(section) = SectionId::from_index(index) else {
            return;
        };
        tracing::debug!(?section, "section revealed");
        for callback in callbacks {
            callback(section);
        }
    }
}

impl std::fmt::Debug for RevealObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealObserver")
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 900.0).unwrap()
    }

    #[test]
    fn fires_once_then_unsubscribes() {
        let mut observer = RevealObserver::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        observer.on_visible(SectionId::About, move |section| {
            assert_eq!(section, SectionId::About);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // Below threshold: nothing happens.
        observer.notify(&[0.0, 0.05, 0.0]);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(observer.pending_count(), 1);

        observer.notify(&[0.0, 0.5, 0.0]);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(observer.pending_count(), 0);

        // Repeat visibility does not re-fire.
        observer.notify(&[0.0, 1.0, 0.0]);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut observer = RevealObserver::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        observer.on_visible(SectionId::Hero, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        observer.notify(&[VISIBILITY_THRESHOLD]);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn bottom_margin_excludes_the_lowest_band() {
        let vp = viewport(); // reveal window is [0, 800)

        // Entirely inside the bottom 100px band: not visible at all.
        let below = SectionRect {
            top: 810.0,
            height: 600.0,
        };
        assert_eq!(visible_fraction(below, vp), 0.0);

        // 55px above the band: 55/600 < threshold. Without the margin this
        // section would show 155px and already count as revealed.
        let entering = SectionRect {
            top: 745.0,
            height: 600.0,
        };
        assert!(visible_fraction(entering, vp) < VISIBILITY_THRESHOLD);

        // Scrolled 100px further: 155/600 clears the threshold.
        let cleared = SectionRect {
            top: 645.0,
            height: 600.0,
        };
        assert!(visible_fraction(cleared, vp) >= VISIBILITY_THRESHOLD);

        // A section filling the viewport is clipped by the margin, never 1.
        let full = SectionRect {
            top: 0.0,
            height: 900.0,
        };
        let fraction = visible_fraction(full, vp);
        assert!((fraction - 800.0 / 900.0).abs() < 1e-9);
    }

    #[test]
    fn observe_frame_reveals_from_section_geometry() {
        let mut observer = RevealObserver::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        observer.on_visible(SectionId::Services, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let vp = viewport();

        // Sections 0..6 stacked; Services (index 2) still below the margin.
        let mut sections: Vec<SectionRect> = (0..7)
            .map(|i| SectionRect {
                top: i as f64 * 900.0 - 1000.0,
                height: 900.0,
            })
            .collect();
        observer.observe_frame(&sections, vp);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        // Scroll until Services has cleared the margin by enough.
        for rect in &mut sections {
            rect.top -= 300.0;
        }
        observer.observe_frame(&sections, vp);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(observer.pending_count(), 0);
    }
}
