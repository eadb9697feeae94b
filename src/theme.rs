use crate::core::Rgb8;

/// Discrete visual mode. Exactly one theme is active at any time; switches
/// are abrupt by design so text never passes through a low-contrast grey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Light => ThemePalette {
                background: Rgb8::WHITE,
                foreground: Rgb8::BLACK,
            },
            Self::Dark => ThemePalette {
                background: Rgb8::BLACK,
                foreground: Rgb8::WHITE,
            },
        }
    }

    /// Base opacity for wireframe shapes under this theme.
    pub fn shape_opacity(self) -> f64 {
        match self {
            Self::Light => 0.35,
            Self::Dark => 0.40,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: Rgb8,
    pub foreground: Rgb8,
}

/// How scroll progress maps to a theme. The two schedules are the two
/// observed designs for the same feature; they diverge at several progress
/// values and are deliberately kept as mutually exclusive choices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ThemeSchedule {
    /// Single switch at progress 0.5 (inclusive toward Dark). Starts Light.
    #[default]
    Midpoint,
    /// Alternating bands at 0.15 / 0.40 / 0.65 / 0.90. Starts Dark.
    Banded,
}

impl ThemeSchedule {
    /// Theme applied once at startup, before the first scroll sample.
    pub fn initial(self) -> Theme {
        match self {
            Self::Midpoint => Theme::Light,
            Self::Banded => Theme::Dark,
        }
    }

    pub fn theme_at(self, progress: f64) -> Theme {
        match self {
            Self::Midpoint => {
                if progress < 0.5 {
                    Theme::Light
                } else {
                    Theme::Dark
                }
            }
            Self::Banded => {
                // Last threshold reached wins; below the first band, Dark.
                const BANDS: [(f64, Theme); 4] = [
                    (0.15, Theme::Light),
                    (0.40, Theme::Dark),
                    (0.65, Theme::Light),
                    (0.90, Theme::Dark),
                ];
                let mut theme = Theme::Dark;
                for (threshold, banded) in BANDS {
                    if progress >= threshold {
                        theme = banded;
                    }
                }
                theme
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeChange {
    pub from: Theme,
    pub to: Theme,
}

/// Maps progress to a theme and emits a change event only on transition.
/// Repeated updates at an unchanged theme are no-ops, so callers never
/// reapply styling redundantly every frame.
#[derive(Clone, Copy, Debug)]
pub struct ThemeMachine {
    schedule: ThemeSchedule,
    current: Theme,
}

impl ThemeMachine {
    pub fn new(schedule: ThemeSchedule) -> Self {
        Self {
            schedule,
            current: schedule.initial(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn update(&mut self, progress: f64) -> Option<ThemeChange> {
        let target = self.schedule.theme_at(progress);
        if target == self.current {
            return None;
        }
        let change = ThemeChange {
            from: self.current,
            to: target,
        };
        self.current = target;
        tracing::debug!(from = ?change.from, to = ?change.to, progress, "theme transition");
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_boundary_is_inclusive_toward_dark() {
        assert_eq!(ThemeSchedule::Midpoint.theme_at(0.49), Theme::Light);
        assert_eq!(ThemeSchedule::Midpoint.theme_at(0.50), Theme::Dark);
    }

    #[test]
    fn banded_thresholds() {
        let s = ThemeSchedule::Banded;
        assert_eq!(s.theme_at(0.10), Theme::Dark);
        assert_eq!(s.theme_at(0.20), Theme::Light);
        assert_eq!(s.theme_at(0.50), Theme::Dark);
        assert_eq!(s.theme_at(0.70), Theme::Light);
        assert_eq!(s.theme_at(0.95), Theme::Dark);
    }

    #[test]
    fn update_emits_exactly_one_transition() {
        let mut m = ThemeMachine::new(ThemeSchedule::Midpoint);
        assert_eq!(m.current(), Theme::Light);

        assert!(m.update(0.2).is_none());
        let change = m.update(0.7).unwrap();
        assert_eq!(change.from, Theme::Light);
        assert_eq!(change.to, Theme::Dark);

        // Idempotent at the same progress: no duplicate event.
        assert!(m.update(0.7).is_none());
        assert!(m.update(0.9).is_none());
    }

    #[test]
    fn initial_themes_differ_per_schedule() {
        assert_eq!(ThemeMachine::new(ThemeSchedule::Midpoint).current(), Theme::Light);
        assert_eq!(ThemeMachine::new(ThemeSchedule::Banded).current(), Theme::Dark);
    }

    #[test]
    fn palettes_invert() {
        assert_eq!(Theme::Light.palette().background, Rgb8::WHITE);
        assert_eq!(Theme::Light.palette().foreground, Rgb8::BLACK);
        assert_eq!(Theme::Dark.palette().background, Rgb8::BLACK);
        assert_eq!(Theme::Dark.palette().foreground, Rgb8::WHITE);
    }
}
