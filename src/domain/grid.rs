use tracing::info;

use super::{
    Allocation, AddressLedger, CellData, CellThing, EntityHandle, EntityKind, EntityRegistry, Rect,
};
use crate::error::SandboxError;

/// Offsets `(d_row, d_column)` of the eight Moore neighbours.
static NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Pixel geometry of one cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridGeometry {
    pub cell_width: u32,
    pub cell_height: u32,
    pub x_padding: u32,
    pub y_padding: u32,
}

impl GridGeometry {
    /// Screen rectangle of the cell at `(row, column)`, or `None` if any
    /// coordinate does not fit in `i32`.
    pub fn cell_rect(&self, row: usize, column: usize) -> Option<Rect> {
        let x = i32::try_from(column).ok()?.checked_mul(i32::try_from(self.x_padding).ok()?)?;
        let y = i32::try_from(row).ok()?.checked_mul(i32::try_from(self.y_padding).ok()?)?;
        let w = i32::try_from(self.cell_width).ok()?;
        let h = i32::try_from(self.cell_height).ok()?;
        x.checked_add(w)?;
        y.checked_add(h)?;
        Some(Rect::new(x, y, w, h))
    }
}

/// Number of whole cells along each axis of the level.
///
/// # Errors
///
/// [`SandboxError::NonIntegerGrid`] if either dimension does not divide
/// exactly (a zero cell dimension never does).
pub fn grid_dimensions(
    level_width: u32,
    level_height: u32,
    cell_width: u32,
    cell_height: u32,
) -> Result<(usize, usize), SandboxError> {
    let exact = cell_width != 0
        && cell_height != 0
        && level_width % cell_width == 0
        && level_height % cell_height == 0;

    if !exact {
        return Err(SandboxError::NonIntegerGrid {
            level_width,
            level_height,
            cell_width,
            cell_height,
        });
    }
    Ok((
        (level_width / cell_width) as usize,
        (level_height / cell_height) as usize,
    ))
}

/// Row/column addressed view over the cell entities.
///
/// Handles are stored row-major: the cell at `(row, column)` lives at
/// `row * width + column`.
#[derive(Debug)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<EntityHandle>,
}

impl CellGrid {
    /// Create every cell entity for a `level_width x level_height` level.
    ///
    /// Row is the outer loop and column the inner one. A cell's rectangle
    /// sits at `(column * x_padding, row * y_padding)`. Every object created
    /// is recorded in `ledger`.
    ///
    /// Geometry and capacity are checked before the first cell is created,
    /// so a failed build leaves the registry and ledger untouched.
    pub fn build(
        level_width: u32,
        level_height: u32,
        geometry: GridGeometry,
        registry: &mut EntityRegistry,
        ledger: &mut AddressLedger,
    ) -> Result<Self, SandboxError> {
        let (width, height) = grid_dimensions(
            level_width,
            level_height,
            geometry.cell_width,
            geometry.cell_height,
        )?;

        let too_large = || SandboxError::LevelTooLarge {
            level_width,
            level_height,
            x_padding: geometry.x_padding,
            y_padding: geometry.y_padding,
        };
        // the far corner has the largest coordinates
        if width > 0 && height > 0 {
            geometry
                .cell_rect(height - 1, width - 1)
                .ok_or_else(too_large)?;
        }

        let needed = width.checked_mul(height).ok_or_else(too_large)?;
        if registry.remaining() < needed {
            return Err(SandboxError::RegistryFull {
                capacity: registry.capacity(),
            });
        }

        let mut cells = Vec::with_capacity(needed);
        for row in 0..height {
            for column in 0..width {
                let graphics = geometry.cell_rect(row, column).ok_or_else(too_large)?;
                let thing = CellThing::new(CellData::new(row, column), graphics);
                let handle = registry.create_entity(
                    EntityKind::Cell(thing),
                    graphics.x,
                    graphics.y,
                    graphics.w,
                    graphics.h,
                )?;

                ledger.record(Allocation::CellGraphics(handle));
                ledger.record(Allocation::CellData(handle));
                ledger.record(Allocation::CellThing(handle));
                ledger.record(Allocation::Entity(handle));
                cells.push(handle);
            }
        }
        ledger.record(Allocation::GridArray { cells: cells.len() });

        info!(width, height, cells = cells.len(), "cell grid built");
        Ok(Self { width, height, cells })
    }

    /// Grid dimensions `(width, height)` in cells.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(row, column)`, if it is inside the grid.
    pub const fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.height && column < self.width {
            Some(row * self.width + column)
        } else {
            None
        }
    }

    pub fn handle_at(&self, row: usize, column: usize) -> Option<EntityHandle> {
        self.index(row, column).map(|idx| self.cells[idx])
    }

    /// All handles in row-major order.
    pub fn handles(&self) -> &[EntityHandle] {
        &self.cells
    }

    pub fn cell_at<'a>(
        &self,
        registry: &'a EntityRegistry,
        row: usize,
        column: usize,
    ) -> Option<&'a CellThing> {
        self.handle_at(row, column)
            .and_then(|handle| registry.get(handle))
            .and_then(|entity| entity.as_cell())
    }

    pub fn cell_at_mut<'a>(
        &self,
        registry: &'a mut EntityRegistry,
        row: usize,
        column: usize,
    ) -> Option<&'a mut CellThing> {
        self.handle_at(row, column)
            .and_then(|handle| registry.get_mut(handle))
            .and_then(|entity| entity.as_cell_mut())
    }

    /// Flat indices of the in-bounds neighbours of `(row, column)`. No
    /// wraparound: edge and corner cells have fewer than eight.
    pub fn neighbor_indices(&self, row: usize, column: usize) -> impl Iterator<Item = usize> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = column.checked_add_signed(dc)?;
            self.index(r, c)
        })
    }

    /// Count alive neighbours of `(row, column)` in a row-major alive snapshot.
    pub fn count_live_neighbors(&self, alive: &[bool], row: usize, column: usize) -> u8 {
        self.neighbor_indices(row, column)
            .filter(|&idx| alive[idx])
            .count() as u8
    }

    /// Row-major snapshot of every cell's alive flag.
    pub fn alive_snapshot(&self, registry: &EntityRegistry) -> Vec<bool> {
        self.cells
            .iter()
            .map(|&handle| {
                registry
                    .get(handle)
                    .and_then(|entity| entity.as_cell())
                    .is_some_and(|thing| thing.data.is_alive())
            })
            .collect()
    }
}
