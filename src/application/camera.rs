use crate::domain::{AddressLedger, Allocation, EntityHandle, EntityKind, EntityRegistry, Rect};
use crate::error::SandboxError;

/// Camera entity covering the visible screen area.
///
/// The camera never moves; panning shifts everything else instead.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    handle: EntityHandle,
    viewport: Rect,
}

impl Camera {
    /// Register a camera of `width x height` at the origin.
    pub fn spawn(
        width: u32,
        height: u32,
        registry: &mut EntityRegistry,
        ledger: &mut AddressLedger,
    ) -> Result<Self, SandboxError> {
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(SandboxError::ScreenTooLarge { width, height });
        };
        let viewport = Rect::new(0, 0, w, h);
        let handle = registry.create_entity(
            EntityKind::Camera(viewport),
            viewport.x,
            viewport.y,
            viewport.w,
            viewport.h,
        )?;
        ledger.record(Allocation::CameraRect(handle));
        ledger.record(Allocation::Entity(handle));
        Ok(Self { handle, viewport })
    }

    pub const fn handle(&self) -> EntityHandle {
        self.handle
    }

    /// Visible screen rectangle.
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// True if any part of `rect` overlaps the viewport.
    pub const fn is_visible(&self, rect: &Rect) -> bool {
        rect.x.saturating_add(rect.w) > self.viewport.x
            && rect.x < self.viewport.x.saturating_add(self.viewport.w)
            && rect.y.saturating_add(rect.h) > self.viewport.y
            && rect.y < self.viewport.y.saturating_add(self.viewport.h)
    }
}
