//! Built-in seed patterns

use crate::coord::Coord;
use crate::grid::{SparseGrid, Visuals};
use rand::prelude::*;
use thiserror::Error;

/// Initial probability of a cell being alive in a random soup
pub const DEFAULT_DENSITY: f64 = 0.3;
/// Side length of the square filled by a random soup
pub const SOUP_SIZE: i64 = 48;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "blinker",
        cells: &[(1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "pulsar",
        cells: &[
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "gosper-gun",
        cells: &[
            (24, 0),
            (22, 1), (24, 1),
            (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
            (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
            (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
            (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
            (10, 6), (16, 6), (24, 6),
            (11, 7), (15, 7),
            (12, 8), (13, 8),
        ],
    },
];

#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("unknown pattern {name:?} (available: {available})")]
    Unknown { name: String, available: String },
    #[error("density must be within [0, 1], got {0}")]
    Density(f64),
    #[error("--seed and --density only apply to the random soup, not to pattern {0:?}")]
    SoupOnly(String),
}

pub fn find(name: &str) -> Result<&'static Pattern, PatternError> {
    let wanted = name.to_lowercase();
    PATTERNS
        .iter()
        .find(|p| p.name == wanted)
        .ok_or_else(|| PatternError::Unknown {
            name: name.to_string(),
            available: names().join(", "),
        })
}

pub fn names() -> Vec<&'static str> {
    PATTERNS.iter().map(|p| p.name).collect()
}

impl Pattern {
    /// Width and height of the pattern's bounding box
    pub fn size(&self) -> (i64, i64) {
        let w = self.cells.iter().map(|&(x, _)| x).max().unwrap_or(-1) + 1;
        let h = self.cells.iter().map(|&(_, y)| y).max().unwrap_or(-1) + 1;
        (w, h)
    }

    /// Bring the pattern to life centred on `center`, returns cells born
    pub fn place<V: Visuals>(&self, grid: &mut SparseGrid<V>, center: Coord) -> usize {
        let (w, h) = self.size();
        let origin = center - Coord::new(w / 2, h / 2);
        self.cells
            .iter()
            .filter(|&&c| grid.birth(origin + Coord::from(c)).is_ok())
            .count()
    }
}

/// What the board starts with
pub enum Seed {
    Empty,
    Pattern(&'static Pattern),
    Random { seed: u64, density: f64 },
}

impl Seed {
    /// Populate the grid around `center`, returns cells born
    pub fn apply<V: Visuals>(&self, grid: &mut SparseGrid<V>, center: Coord) -> Result<usize, PatternError> {
        match self {
            Seed::Empty => Ok(0),
            Seed::Pattern(pattern) => Ok(pattern.place(grid, center)),
            Seed::Random { seed, density } => {
                random_soup(grid, center, *density, &mut StdRng::seed_from_u64(*seed))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Seed::Empty => "empty board".to_string(),
            Seed::Pattern(pattern) => pattern.name.to_string(),
            Seed::Random { seed, density } => format!("random soup (seed {seed}, density {density})"),
        }
    }
}

/// Fill a `SOUP_SIZE` square centred on `center` with random cells
pub fn random_soup<V: Visuals>(
    grid: &mut SparseGrid<V>,
    center: Coord,
    density: f64,
    rng: &mut StdRng,
) -> Result<usize, PatternError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(PatternError::Density(density));
    }
    let origin = center - Coord::new(SOUP_SIZE / 2, SOUP_SIZE / 2);
    let mut born = 0;
    for y in 0..SOUP_SIZE {
        for x in 0..SOUP_SIZE {
            if rng.gen_bool(density) && grid.birth(origin + Coord::new(x, y)).is_ok() {
                born += 1;
            }
        }
    }
    Ok(born)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Headless;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find("Glider").map(|p| p.name), Ok("glider"));
        let err = find("spaceship").err().unwrap();
        assert!(err.to_string().contains("gosper-gun"));
    }

    #[test]
    fn patterns_have_unique_cells() {
        for pattern in PATTERNS {
            let mut grid: SparseGrid<Headless> = SparseGrid::default();
            assert_eq!(pattern.place(&mut grid, Coord::default()), pattern.cells.len(), "{}", pattern.name);
        }
    }

    #[test]
    fn still_and_periodic_patterns_return() {
        for (name, period) in [("block", 1), ("blinker", 2), ("toad", 2), ("beacon", 2), ("pulsar", 3)] {
            let mut grid: SparseGrid<Headless> = SparseGrid::default();
            find(name).unwrap().place(&mut grid, Coord::new(100, -50));
            let mut start: Vec<Coord> = grid.live_cells().collect();
            start.sort();
            for _ in 0..period {
                grid.step();
            }
            let mut end: Vec<Coord> = grid.live_cells().collect();
            end.sort();
            assert_eq!(start, end, "{name}");
        }
    }

    #[test]
    fn gosper_gun_emits_gliders() {
        let mut grid: SparseGrid<Headless> = SparseGrid::default();
        find("gosper-gun").unwrap().place(&mut grid, Coord::default());
        let initial = grid.population();
        for _ in 0..30 {
            grid.step();
        }
        // one period later the gun is back plus a five-cell glider
        assert_eq!(grid.population(), initial + 5);
    }

    #[test]
    fn seeds_populate_grid() {
        let mut grid: SparseGrid<Headless> = SparseGrid::default();
        assert_eq!(Seed::Empty.apply(&mut grid, Coord::default()), Ok(0));
        assert_eq!(Seed::Pattern(find("glider").unwrap()).apply(&mut grid, Coord::default()), Ok(5));

        let random = Seed::Random { seed: 3, density: 0.5 };
        let mut soup: SparseGrid<Headless> = SparseGrid::default();
        let born = random.apply(&mut soup, Coord::default()).unwrap();
        assert_eq!(born, soup.population());
        assert!(random.describe().contains("seed 3"));
    }

    #[test]
    fn soup_respects_seed_and_density() {
        let mut a: SparseGrid<Headless> = SparseGrid::default();
        let mut b: SparseGrid<Headless> = SparseGrid::default();
        let born_a = random_soup(&mut a, Coord::default(), 0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        let born_b = random_soup(&mut b, Coord::default(), 0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(born_a, born_b);
        assert!(born_a > 0 && born_a < (SOUP_SIZE * SOUP_SIZE) as usize);

        let mut empty: SparseGrid<Headless> = SparseGrid::default();
        assert_eq!(random_soup(&mut empty, Coord::default(), 0.0, &mut StdRng::seed_from_u64(1)), Ok(0));
        assert_eq!(
            random_soup(&mut empty, Coord::default(), 1.5, &mut StdRng::seed_from_u64(1)),
            Err(PatternError::Density(1.5))
        );
    }
}
