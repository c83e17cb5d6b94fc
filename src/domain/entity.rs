use std::ops::{Index, IndexMut};

use super::{CellThing, Rect};
use crate::error::SandboxError;

/// Stable index of an entity in the [`EntityRegistry`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EntityHandle(pub usize);

/// Kind-specific payload of an entity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntityKind {
    /// The viewport rectangle.
    Camera(Rect),
    Cell(CellThing),
}

/// A positioned, sized object in the world.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Entity {
    pub kind: EntityKind,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Position the pan offset is applied to each frame.
    pub home_x: i32,
    pub home_y: i32,
}

impl Entity {
    pub const fn new(kind: EntityKind, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            kind,
            x,
            y,
            w,
            h,
            home_x: x,
            home_y: y,
        }
    }

    pub const fn is_camera(&self) -> bool {
        matches!(self.kind, EntityKind::Camera(_))
    }

    /// Current screen bounds.
    pub const fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub const fn as_cell(&self) -> Option<&CellThing> {
        match &self.kind {
            EntityKind::Cell(thing) => Some(thing),
            EntityKind::Camera(_) => None,
        }
    }

    pub fn as_cell_mut(&mut self) -> Option<&mut CellThing> {
        match &mut self.kind {
            EntityKind::Cell(thing) => Some(thing),
            EntityKind::Camera(_) => None,
        }
    }
}

/// Append-only entity table with a capacity fixed at construction.
///
/// Storage is reserved up front, so creating an entity never reallocates and
/// handles stay valid for the registry's lifetime.
#[derive(Debug)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    capacity: usize,
}

impl EntityRegistry {
    /// Reserve room for exactly `capacity` entities.
    ///
    /// # Errors
    ///
    /// [`SandboxError::Allocation`] if the storage cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self, SandboxError> {
        let mut entities = Vec::new();
        entities
            .try_reserve_exact(capacity)
            .map_err(|source| SandboxError::Allocation { capacity, source })?;
        Ok(Self { entities, capacity })
    }

    /// Append an entity with `home` set to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::RegistryFull`] once `capacity` entities exist.
    pub fn create_entity(
        &mut self,
        kind: EntityKind,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<EntityHandle, SandboxError> {
        if self.entities.len() >= self.capacity {
            return Err(SandboxError::RegistryFull {
                capacity: self.capacity,
            });
        }
        let handle = EntityHandle(self.entities.len());
        self.entities.push(Entity::new(kind, x, y, w, h));
        Ok(handle)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.entities.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.entities.get_mut(handle.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.entities.len()
    }
}

impl Index<EntityHandle> for EntityRegistry {
    type Output = Entity;

    fn index(&self, handle: EntityHandle) -> &Entity {
        &self.entities[handle.0]
    }
}

impl IndexMut<EntityHandle> for EntityRegistry {
    fn index_mut(&mut self, handle: EntityHandle) -> &mut Entity {
        &mut self.entities[handle.0]
    }
}
