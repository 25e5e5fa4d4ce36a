use glam::Mat4;
use spheremap_common::Extent;
use std::fmt::Write;

/// Graphics backend driven by the simulation thread.
///
/// Both calls are synchronous for the caller; a backend may still queue GPU
/// work asynchronously. `Send` because the backend is built on the platform
/// thread and then moved onto the simulation thread.
pub trait RenderBackend: Send {
    /// The framebuffer changed size.
    fn resize(&mut self, extent: Extent);

    /// Draw and present one frame seen through `view`.
    fn render(&mut self, view: &Mat4);
}

/// One call made into a [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCall {
    Resize(Extent),
    Render(Mat4),
}

/// Backend that draws nothing and remembers every call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<RenderCall>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn render_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Render(_)))
            .count()
    }

    /// Most recent view matrix rendered, if any.
    pub fn last_view(&self) -> Option<Mat4> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::Render(view) => Some(*view),
            RenderCall::Resize(_) => None,
        })
    }

    /// Most recent size the backend was told about, if any.
    pub fn last_extent(&self) -> Option<Extent> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::Resize(extent) => Some(*extent),
            RenderCall::Render(_) => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Human-readable summary of what was recorded.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Recorded render calls ({}) ===", self.calls.len());
        let _ = writeln!(out, "Frames: {}", self.render_count());
        if let Some(extent) = self.last_extent() {
            let _ = writeln!(out, "Extent: {}x{}", extent.width, extent.height);
        }
        if let Some(view) = self.last_view() {
            let eye = view.inverse().w_axis;
            let _ = writeln!(out, "Eye: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
        }
        out
    }
}

impl RenderBackend for RecordingBackend {
    fn resize(&mut self, extent: Extent) {
        tracing::trace!(width = extent.width, height = extent.height, "resize recorded");
        self.calls.push(RenderCall::Resize(extent));
    }

    fn render(&mut self, view: &Mat4) {
        self.calls.push(RenderCall::Render(*view));
    }
}
