#![forbid(unsafe_code)]

pub mod content;
pub mod core;
pub mod crossfade;
pub mod ease;
pub mod engine;
pub mod error;
pub mod render;
pub mod reveal;
pub mod scroll;
pub mod section;
pub mod shape;
pub mod theme;

pub use crate::core::{Rgb8, TickIndex, Viewport};
pub use content::{ContentDocument, Portfolio, SectionId};
pub use crossfade::{CrossfadeController, SlotBlend, SlotState};
pub use ease::Ease;
pub use engine::{CameraRig, FrameEnv, FrameReport, SceneConfig, SceneEngine};
pub use error::{SceneError, SceneResult};
pub use render::{RecordingRenderer, RenderCall, ShapeHandle, ShapeRenderer};
pub use reveal::{RevealObserver, visible_fraction};
pub use scroll::{FrameCoalescer, scroll_progress};
pub use section::{SectionRect, SectionTracker, locate_current};
pub use shape::{CornerSlot, ShapeDescriptor, ShapeKind, ShapeTable};
pub use theme::{Theme, ThemeChange, ThemeMachine, ThemeSchedule};
