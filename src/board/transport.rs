//! Snakes and ladders.
//!
//! A `TransportTable` maps a source cell to a destination cell. Destination
//! above the source is a ladder, below is a snake. The table is pure data:
//! the turn reducer looks up the resting cell once per turn and never
//! re-checks the destination.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{Cell, WINNING_CELL};
use crate::core::error::TableError;

/// Ladders on the standard board, as (foot, top).
pub const STANDARD_LADDERS: [(Cell, Cell); 11] = [
    (2, 38),
    (7, 14),
    (8, 31),
    (15, 26),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
    (78, 98),
    (87, 94),
];

/// Snakes on the standard board, as (head, tail).
pub const STANDARD_SNAKES: [(Cell, Cell); 9] = [
    (16, 6),
    (46, 25),
    (49, 11),
    (62, 19),
    (64, 60),
    (74, 53),
    (89, 68),
    (92, 88),
    (97, 78),
];

/// Ladder or snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    Ladder,
    Snake,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Ladder => f.write_str("ladder"),
            TransportKind::Snake => f.write_str("snake"),
        }
    }
}

/// One table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transport {
    pub from: Cell,
    pub to: Cell,
}

impl Transport {
    #[must_use]
    pub const fn new(from: Cell, to: Cell) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn kind(&self) -> TransportKind {
        if self.to > self.from {
            TransportKind::Ladder
        } else {
            TransportKind::Snake
        }
    }
}

/// Source cell to destination cell, read-only once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportTable {
    links: FxHashMap<Cell, Cell>,
}

impl TransportTable {
    /// Build a table, validating every entry.
    ///
    /// ```
    /// use ular_tangga::board::{TransportKind, TransportTable};
    ///
    /// let table = TransportTable::new([(3, 22), (40, 5)]).unwrap();
    /// assert_eq!(table.lookup(3).map(|t| t.kind()), Some(TransportKind::Ladder));
    /// assert_eq!(table.lookup(40).map(|t| t.to), Some(5));
    /// assert!(table.lookup(4).is_none());
    /// ```
    pub fn new(pairs: impl IntoIterator<Item = (Cell, Cell)>) -> Result<Self, TableError> {
        let mut links = FxHashMap::default();

        for (from, to) in pairs {
            if !(1..WINNING_CELL).contains(&from) {
                return Err(TableError::SourceOutOfRange { cell: from });
            }
            if !(2..=WINNING_CELL).contains(&to) {
                return Err(TableError::DestinationOutOfRange { cell: to });
            }
            if from == to {
                return Err(TableError::SelfLoop { cell: from });
            }
            if links.insert(from, to).is_some() {
                return Err(TableError::DuplicateSource { cell: from });
            }
        }

        Ok(Self { links })
    }

    /// A board with no snakes or ladders.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard board, built once per process.
    pub fn standard() -> &'static TransportTable {
        static STANDARD: OnceLock<TransportTable> = OnceLock::new();
        STANDARD.get_or_init(|| Self {
            links: STANDARD_LADDERS
                .iter()
                .chain(STANDARD_SNAKES.iter())
                .copied()
                .collect(),
        })
    }

    /// The transport starting on `cell`, if any.
    #[must_use]
    pub fn lookup(&self, cell: Cell) -> Option<Transport> {
        self.links.get(&cell).map(|&to| Transport::new(cell, to))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All transports ordered by source cell.
    pub fn transports(&self) -> Vec<Transport> {
        let mut all: Vec<_> = self
            .links
            .iter()
            .map(|(&from, &to)| Transport::new(from, to))
            .collect();
        all.sort_by_key(|t| t.from);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_passes_validation() {
        let pairs = STANDARD_LADDERS.iter().chain(STANDARD_SNAKES.iter()).copied();
        let validated = TransportTable::new(pairs).unwrap();
        assert_eq!(&validated, TransportTable::standard());
        assert_eq!(validated.len(), STANDARD_LADDERS.len() + STANDARD_SNAKES.len());
    }

    #[test]
    fn test_standard_kinds() {
        for &(from, to) in &STANDARD_LADDERS {
            assert_eq!(Transport::new(from, to).kind(), TransportKind::Ladder);
        }
        for &(from, to) in &STANDARD_SNAKES {
            assert_eq!(Transport::new(from, to).kind(), TransportKind::Snake);
        }
    }

    #[test]
    fn test_standard_board_keeps_bounce_cells_plain() {
        let table = TransportTable::standard();
        for cell in [95, 96, 98, 99] {
            assert!(table.lookup(cell).is_none(), "cell {cell} should be plain");
        }
    }

    #[test]
    fn test_standard_first_ladder_reachable_from_start() {
        let ladder = TransportTable::standard().lookup(2).unwrap();
        assert_eq!(ladder.to, 38);
        assert_eq!(ladder.kind(), TransportKind::Ladder);
    }

    #[test]
    fn test_rejects_bad_entries() {
        assert_eq!(
            TransportTable::new([(0, 10)]),
            Err(TableError::SourceOutOfRange { cell: 0 })
        );
        assert_eq!(
            TransportTable::new([(100, 10)]),
            Err(TableError::SourceOutOfRange { cell: 100 })
        );
        assert_eq!(
            TransportTable::new([(10, 1)]),
            Err(TableError::DestinationOutOfRange { cell: 1 })
        );
        assert_eq!(
            TransportTable::new([(10, 101)]),
            Err(TableError::DestinationOutOfRange { cell: 101 })
        );
        assert_eq!(
            TransportTable::new([(10, 10)]),
            Err(TableError::SelfLoop { cell: 10 })
        );
        assert_eq!(
            TransportTable::new([(10, 20), (10, 30)]),
            Err(TableError::DuplicateSource { cell: 10 })
        );
    }

    #[test]
    fn test_transports_sorted() {
        let table = TransportTable::new([(50, 3), (4, 60), (20, 99)]).unwrap();
        let froms: Vec<_> = table.transports().iter().map(|t| t.from).collect();
        assert_eq!(froms, vec![4, 20, 50]);
    }

    #[test]
    fn test_empty_table() {
        let table = TransportTable::empty();
        assert!(table.is_empty());
        assert!(table.lookup(2).is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransportKind::Ladder.to_string(), "ladder");
        assert_eq!(TransportKind::Snake.to_string(), "snake");
    }
}
