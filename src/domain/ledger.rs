//! Allocation ledger.
//!
//! Every object created while the sandbox is set up is recorded here, in
//! creation order. The ledger is drained once at shutdown; storage itself is
//! owned by the registry and grid, so draining is the accounting step that
//! pairs each creation with exactly one release.

use super::EntityHandle;

/// One tracked allocation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Allocation {
    /// The entity table, sized once at startup.
    EntityTable { capacity: usize },
    /// The flat grid array of cell handles.
    GridArray { cells: usize },
    /// On-screen rectangle of a cell.
    CellGraphics(EntityHandle),
    /// Simulation data of a cell.
    CellData(EntityHandle),
    /// The data/rectangle pair of a cell.
    CellThing(EntityHandle),
    /// The camera's viewport rectangle.
    CameraRect(EntityHandle),
    /// An entity record.
    Entity(EntityHandle),
}

#[derive(Debug, Default)]
pub struct AddressLedger {
    records: Vec<Allocation>,
}

impl AddressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track one allocation.
    pub fn record(&mut self, allocation: Allocation) {
        self.records.push(allocation);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Allocation> + '_ {
        self.records.iter()
    }

    /// Release every record once, in the order recorded, and clear the ledger.
    ///
    /// Returns how many records were released. An empty ledger releases
    /// nothing.
    pub fn drain_all(&mut self, mut release: impl FnMut(Allocation)) -> usize {
        let count = self.records.len();
        for allocation in self.records.drain(..) {
            release(allocation);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_releases_in_record_order() {
        let mut ledger = AddressLedger::new();
        ledger.record(Allocation::EntityTable { capacity: 4 });
        ledger.record(Allocation::CellData(EntityHandle(0)));
        ledger.record(Allocation::Entity(EntityHandle(0)));

        let mut released = Vec::new();
        let count = ledger.drain_all(|a| released.push(a));

        assert_eq!(count, 3);
        assert_eq!(
            released,
            vec![
                Allocation::EntityTable { capacity: 4 },
                Allocation::CellData(EntityHandle(0)),
                Allocation::Entity(EntityHandle(0)),
            ]
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_drain_empty_ledger() {
        let mut ledger = AddressLedger::new();
        let mut calls = 0;
        assert_eq!(ledger.drain_all(|_| calls += 1), 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_second_drain_releases_nothing() {
        let mut ledger = AddressLedger::new();
        ledger.record(Allocation::GridArray { cells: 9 });
        assert_eq!(ledger.drain_all(|_| {}), 1);
        assert_eq!(ledger.drain_all(|_| {}), 0);
    }
}
