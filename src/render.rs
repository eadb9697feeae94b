use std::collections::BTreeMap;

use crate::{
    core::{Point, Rgb8},
    error::{SceneError, SceneResult},
    shape::ShapeKind,
};

/// Opaque handle to a shape created by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeHandle(pub u64);

/// Renderer seam. The core treats the backend as a data sink: it creates
/// shapes at anchor points, pushes per-frame opacity/color/transform values,
/// and disposes every handle on teardown. Implementations own the actual
/// geometry and GPU resources.
pub trait ShapeRenderer {
    fn create(&mut self, kind: ShapeKind, anchor: Point) -> SceneResult<ShapeHandle>;
    fn set_opacity(&mut self, handle: ShapeHandle, opacity: f64) -> SceneResult<()>;
    fn set_color(&mut self, handle: ShapeHandle, color: Rgb8) -> SceneResult<()>;
    fn set_transform(
        &mut self,
        handle: ShapeHandle,
        rotation: f64,
        float_offset: f64,
    ) -> SceneResult<()>;
    fn dispose(&mut self, handle: ShapeHandle) -> SceneResult<()>;
    /// Page/scene clear color, driven by the active theme.
    fn set_clear_color(&mut self, color: Rgb8) -> SceneResult<()>;
}

/// Every call a [`RecordingRenderer`] has seen, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCall {
    Create(ShapeHandle, ShapeKind, Point),
    SetOpacity(ShapeHandle, f64),
    SetColor(ShapeHandle, Rgb8),
    SetTransform(ShapeHandle, f64, f64),
    Dispose(ShapeHandle),
    SetClearColor(Rgb8),
}

/// In-memory renderer used by tests and the CLI simulator. Records calls
/// and tracks which handles are still live.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_handle: u64,
    live: BTreeMap<ShapeHandle, ShapeKind>,
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_handles(&self) -> usize {
        self.live.len()
    }

    pub fn live_kind(&self, handle: ShapeHandle) -> Option<ShapeKind> {
        self.live.get(&handle).copied()
    }

    fn check_live(&self, handle: ShapeHandle) -> SceneResult<()> {
        if self.live.contains_key(&handle) {
            Ok(())
        } else {
            Err(SceneError::render(format!(
                "handle {} is not live",
                handle.0
            )))
        }
    }
}

impl ShapeRenderer for RecordingRenderer {
    fn create(&mut self, kind: ShapeKind, anchor: Point) -> SceneResult<ShapeHandle> {
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, kind);
        self.calls.push(RenderCall::Create(handle, kind, anchor));
        Ok(handle)
    }

    fn set_opacity(&mut self, handle: ShapeHandle, opacity: f64) -> SceneResult<()> {
        self.check_live(handle)?;
        self.calls.push(RenderCall::SetOpacity(handle, opacity));
        Ok(())
    }

    fn set_color(&mut self, handle: ShapeHandle, color: Rgb8) -> SceneResult<()> {
        self.check_live(handle)?;
        self.calls.push(RenderCall::SetColor(handle, color));
        Ok(())
    }

    fn set_transform(
        &mut self,
        handle: ShapeHandle,
        rotation: f64,
        float_offset: f64,
    ) -> SceneResult<()> {
        self.check_live(handle)?;
        self.calls
            .push(RenderCall::SetTransform(handle, rotation, float_offset));
        Ok(())
    }

    fn dispose(&mut self, handle: ShapeHandle) -> SceneResult<()> {
        if self.live.remove(&handle).is_none() {
            return Err(SceneError::render(format!(
                "double dispose of handle {}",
                handle.0
            )));
        }
        self.calls.push(RenderCall::Dispose(handle));
        Ok(())
    }

    fn set_clear_color(&mut self, color: Rgb8) -> SceneResult<()> {
        self.calls.push(RenderCall::SetClearColor(color));
        Ok(())
    }
}
