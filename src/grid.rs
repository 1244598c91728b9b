//! Sparse Game of Life grid
//!
//! Only live cells and the frontier (dead cells touching at least one live
//! cell) are stored. The frontier keeps, for every candidate, the number of
//! live neighbours currently contributing it, so toggling a cell adjusts
//! exactly the eight counts around it.

use crate::coord::Coord;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Rendering collaborator. The grid asks for one visual per birth and hands
/// it back exactly once when the cell dies.
pub trait Visuals {
    type Handle;

    fn create_visual(&mut self, at: Coord) -> Self::Handle;
    fn destroy_visual(&mut self, handle: Self::Handle);
}

/// Collaborator for runs without a display
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Visuals for Headless {
    type Handle = ();

    fn create_visual(&mut self, _at: Coord) {}
    fn destroy_visual(&mut self, _handle: ()) {}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {0} is already alive")]
    AlreadyAlive(Coord),
    #[error("cell {0} is already dead")]
    AlreadyDead(Coord),
}

/// Cells that changed state during one step
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Generation {
    pub born: BTreeSet<Coord>,
    pub died: BTreeSet<Coord>,
}

impl Generation {
    pub fn is_empty(&self) -> bool {
        self.born.is_empty() && self.died.is_empty()
    }
}

pub struct SparseGrid<V: Visuals> {
    live: HashMap<Coord, V::Handle>,
    frontier: HashMap<Coord, u32>,
    visuals: V,
}

impl<V: Visuals + Default> Default for SparseGrid<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V: Visuals> SparseGrid<V> {
    pub fn new(visuals: V) -> Self {
        Self {
            live: HashMap::new(),
            frontier: HashMap::new(),
            visuals,
        }
    }

    #[inline]
    pub fn is_alive(&self, at: Coord) -> bool {
        self.live.contains_key(&at)
    }

    /// Flip a cell, returns whether it is now alive
    pub fn toggle(&mut self, at: Coord) -> bool {
        if self.is_alive(at) {
            self.remove_live(at);
            false
        } else {
            self.insert_live(at);
            true
        }
    }

    pub fn birth(&mut self, at: Coord) -> Result<(), GridError> {
        if self.is_alive(at) {
            return Err(GridError::AlreadyAlive(at));
        }
        self.insert_live(at);
        Ok(())
    }

    pub fn kill(&mut self, at: Coord) -> Result<(), GridError> {
        if !self.is_alive(at) {
            return Err(GridError::AlreadyDead(at));
        }
        self.remove_live(at);
        Ok(())
    }

    /// Advance one generation under B3/S23.
    ///
    /// Every decision is taken against the current generation before any
    /// cell changes, then applied through the same birth/kill bookkeeping
    /// used for manual toggles.
    pub fn step(&mut self) -> Generation {
        let born: BTreeSet<Coord> = self
            .frontier
            .keys()
            .copied()
            .filter(|&c| self.live_neighbors(c) == 3)
            .collect();
        let died: BTreeSet<Coord> = self
            .live
            .keys()
            .copied()
            .filter(|&c| !matches!(self.live_neighbors(c), 2 | 3))
            .collect();

        for &c in &born {
            self.insert_live(c);
        }
        for &c in &died {
            self.remove_live(c);
        }

        Generation { born, died }
    }

    /// Number of live cells among the eight around `at`
    pub fn live_neighbors(&self, at: Coord) -> u8 {
        at.neighbors().filter(|n| self.live.contains_key(n)).count() as u8
    }

    /// Kill every live cell, returns the cells removed
    pub fn clear(&mut self) -> Vec<Coord> {
        let cells: Vec<Coord> = self.live.keys().copied().collect();
        for &c in &cells {
            self.remove_live(c);
        }
        cells
    }

    pub fn population(&self) -> usize {
        self.live.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Live neighbours recorded for a frontier candidate, 0 when untracked
    pub fn frontier_count(&self, at: Coord) -> u32 {
        self.frontier.get(&at).copied().unwrap_or(0)
    }

    pub fn in_frontier(&self, at: Coord) -> bool {
        self.frontier.contains_key(&at)
    }

    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.live.keys().copied()
    }

    pub fn frontier_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.frontier.keys().copied()
    }

    /// Inclusive bounding box (min, max) of the live cells
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        let mut cells = self.live.keys();
        let first = *cells.next()?;
        Some(cells.fold((first, first), |(lo, hi), c| {
            (
                Coord::new(lo.x.min(c.x), lo.y.min(c.y)),
                Coord::new(hi.x.max(c.x), hi.y.max(c.y)),
            )
        }))
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    pub fn visuals_mut(&mut self) -> &mut V {
        &mut self.visuals
    }

    fn insert_live(&mut self, at: Coord) {
        debug_assert!(!self.live.contains_key(&at));
        let handle = self.visuals.create_visual(at);
        self.live.insert(at, handle);

        for n in at.neighbors() {
            if !self.live.contains_key(&n) {
                *self.frontier.entry(n).or_insert(0) += 1;
            }
        }
        self.frontier.remove(&at);
    }

    fn remove_live(&mut self, at: Coord) {
        let Some(handle) = self.live.remove(&at) else {
            return;
        };
        self.visuals.destroy_visual(handle);

        let mut still_touching = 0;
        for n in at.neighbors() {
            if self.live.contains_key(&n) {
                still_touching += 1;
            } else if let Some(count) = self.frontier.get_mut(&n) {
                *count -= 1;
                if *count == 0 {
                    self.frontier.remove(&n);
                }
            }
        }
        if still_touching > 0 {
            self.frontier.insert(at, still_touching);
        }
    }
}
