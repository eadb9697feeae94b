use crate::core::Viewport;

/// Viewport-relative bounding geometry of one page section.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionRect {
    pub top: f64,
    pub height: f64,
}

impl SectionRect {
    pub fn center(self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Index of the section whose vertical center is nearest the viewport
/// center. Exact ties go to the lower index (first minimum in scan order,
/// stable because section order is fixed). Empty input yields `None`.
pub fn locate_current(sections: &[SectionRect], viewport: Viewport) -> Option<usize> {
    let target = viewport.center_y();
    let mut best: Option<(usize, f64)> = None;
    for (index, rect) in sections.iter().enumerate() {
        let distance = (rect.center() - target).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Remembers the last reported section and yields only changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SectionTracker {
    current: Option<usize>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Feed the latest locator result; `Some(index)` only when the active
    /// section changed (including the very first location).
    pub fn observe(&mut self, located: Option<usize>) -> Option<usize> {
        let located = located?;
        if self.current == Some(located) {
            return None;
        }
        self.current = Some(located);
        tracing::trace!(section = located, "active section changed");
        Some(located)
    }
}
