//! Integer cell coordinates on the unbounded grid

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// The eight unit offsets surrounding a cell
pub const NEIGHBOR_OFFSETS: [Coord; 8] = [
    Coord::new(-1, -1),
    Coord::new(0, -1),
    Coord::new(1, -1),
    Coord::new(-1, 0),
    Coord::new(1, 0),
    Coord::new(-1, 1),
    Coord::new(0, 1),
    Coord::new(1, 1),
];

/// A cell position. Equality, ordering and hashing are structural.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Componentwise add, `None` if either axis leaves the `i64` range
    pub fn checked_add(self, rhs: Coord) -> Option<Coord> {
        Some(Coord::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }

    /// The surrounding cells. Cells on the edge of the `i64` plane have fewer
    /// than eight; nothing wraps around.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |offset| self.checked_add(offset))
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i64> for Coord {
    type Output = Coord;

    fn mul(self, factor: i64) -> Coord {
        Coord::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Coord, NEIGHBOR_OFFSETS};
    use std::collections::HashSet;

    #[test]
    fn offsets_exclude_origin_and_are_unique() {
        let set: HashSet<Coord> = NEIGHBOR_OFFSETS.iter().copied().collect();
        assert_eq!(set.len(), 8);
        assert!(!set.contains(&Coord::new(0, 0)));
        assert!(set.iter().all(|c| c.x.abs() <= 1 && c.y.abs() <= 1));
    }

    #[test]
    fn neighbors_surround_the_cell() {
        let center = Coord::new(10, -4);
        let around: HashSet<Coord> = center.neighbors().collect();
        assert!(around.contains(&Coord::new(9, -5)));
        assert!(around.contains(&Coord::new(11, -3)));
        assert!(!around.contains(&center));
    }

    #[test]
    fn edge_cells_have_no_wrapped_neighbors() {
        let right = Coord::new(i64::MAX, 0);
        let around: Vec<Coord> = right.neighbors().collect();
        assert_eq!(around.len(), 5);
        assert!(around.iter().all(|c| c.x >= i64::MAX - 1));

        let corner = Coord::new(i64::MIN, i64::MIN);
        let around: HashSet<Coord> = corner.neighbors().collect();
        assert_eq!(around.len(), 3);
        assert!(around.contains(&Coord::new(i64::MIN + 1, i64::MIN + 1)));

        assert_eq!(right.checked_add(Coord::new(1, 0)), None);
        assert_eq!(right.checked_add(Coord::new(-1, 2)), Some(Coord::new(i64::MAX - 1, 2)));
    }

    #[test]
    fn equal_values_hash_equal() {
        let mut set = HashSet::new();
        set.insert(Coord::new(3, 4));
        assert!(set.contains(&Coord::from((3, 4))));
        assert!(!set.contains(&Coord::new(4, 3)));
    }

    #[test]
    fn arithmetic() {
        let a = Coord::new(2, -1);
        assert_eq!(a + Coord::new(1, 1), Coord::new(3, 0));
        assert_eq!(a - Coord::new(2, -1), Coord::default());
        assert_eq!(a * 3, Coord::new(6, -3));
        assert_eq!(a.to_string(), "(2, -1)");
    }
}
