/// Normalized scroll progress in [0, 1].
///
/// Defined as `offset / (document_height - viewport_height)`, clamped.
/// A page with no scrollable range (document no taller than the viewport)
/// has progress 0; the denominator is never allowed to reach zero.
pub fn scroll_progress(offset: f64, document_height: f64, viewport_height: f64) -> f64 {
    let range = document_height - viewport_height;
    if !(range > 0.0) {
        return 0.0;
    }
    (offset / range).clamp(0.0, 1.0)
}

/// Pending-flag guard that collapses any number of input events arriving
/// before the next rendered frame into a single recomputation.
///
/// Listeners call [`FrameCoalescer::request`]; the per-frame tick calls
/// [`FrameCoalescer::take`] and recomputes only when it returns `true`.
/// Events are never queued individually.
#[derive(Debug, Default)]
pub struct FrameCoalescer {
    pending: bool,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark that scroll-derived state needs a recompute. Returns `true` only
    /// for the first request since the last frame, so callers that need to
    /// schedule a frame can do so exactly once.
    pub fn request(&mut self) -> bool {
        let first = !self.pending;
        self.pending = true;
        first
    }

    /// Consume the pending flag. At most one `true` per frame.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped_ratio() {
        assert_eq!(scroll_progress(0.0, 4000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1500.0, 4000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(3000.0, 4000.0, 1000.0), 1.0);
        assert_eq!(scroll_progress(9999.0, 4000.0, 1000.0), 1.0);
        assert_eq!(scroll_progress(-50.0, 4000.0, 1000.0), 0.0);
    }

    #[test]
    fn progress_is_monotonic_in_offset() {
        let mut last = 0.0;
        for step in 0..=30 {
            let p = scroll_progress(step as f64 * 100.0, 4000.0, 1000.0);
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn degenerate_range_yields_zero() {
        // Document shorter than or equal to the viewport: nothing to scroll.
        assert_eq!(scroll_progress(100.0, 800.0, 900.0), 0.0);
        assert_eq!(scroll_progress(100.0, 900.0, 900.0), 0.0);
        assert_eq!(scroll_progress(100.0, f64::NAN, 900.0), 0.0);
    }

    #[test]
    fn coalescer_collapses_bursts() {
        let mut c = FrameCoalescer::new();
        assert!(c.request());
        assert!(!c.request());
        assert!(!c.request());
        assert!(c.take());
        assert!(!c.take());
        assert!(c.request());
    }
}
