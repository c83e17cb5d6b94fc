use crate::domain::{Entity, EntityKind, EntityRegistry};

use super::InputState;

/// Reposition one entity from its home and the held pan direction.
///
/// Cells commit the result: their rectangle moves and the new position
/// becomes their home, so a held key keeps drifting the world by `step`
/// pixels every frame. No held direction leaves the entity untouched.
pub fn apply_pan(entity: &mut Entity, input: &InputState, step: i32) {
    let Some(direction) = input.pan_direction() else {
        return;
    };
    let (dx, dy) = direction.offset(step);
    entity.x = entity.home_x.saturating_add(dx);
    entity.y = entity.home_y.saturating_add(dy);

    if let EntityKind::Cell(thing) = &mut entity.kind {
        thing.graphics.move_to(entity.x, entity.y);
        entity.home_x = entity.x;
        entity.home_y = entity.y;
    }
}

/// Apply [`apply_pan`] to every non-camera entity.
pub fn pan_all(registry: &mut EntityRegistry, input: &InputState, step: i32) {
    registry
        .iter_mut()
        .filter(|entity| !entity.is_camera())
        .for_each(|entity| apply_pan(entity, input, step));
}
