//! Simulation driver: run/pause, speed control and timed stepping

use crate::config::LifeConfig;
use crate::coord::Coord;
use crate::grid::{Generation, SparseGrid, Visuals};
use crate::timer::Timer;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Result of a cell toggle request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggled {
    Born,
    Died,
    /// Dropped because a run is in progress
    Ignored,
}

pub struct Driver<V: Visuals> {
    grid: SparseGrid<V>,
    running: bool,
    rate: f64,
    acceleration: f64,
    max_rate: f64,
    timer: Timer,
    generation: u64,
}

impl<V: Visuals> Driver<V> {
    pub fn new(grid: SparseGrid<V>, config: &LifeConfig) -> Self {
        Self {
            grid,
            running: false,
            rate: config.rate,
            acceleration: config.acceleration_factor,
            max_rate: config.max_rate,
            timer: Timer::new(),
            generation: 0,
        }
    }

    pub fn is_alive(&self, at: Coord) -> bool {
        self.grid.is_alive(at)
    }

    /// Flip a cell unless the simulation is running
    pub fn toggle_cell(&mut self, at: Coord) -> Toggled {
        if self.running {
            return Toggled::Ignored;
        }
        if self.grid.toggle(at) {
            Toggled::Born
        } else {
            Toggled::Died
        }
    }

    /// Start or stop the run, returns whether it is now running
    pub fn toggle_run(&mut self, now: Instant) -> bool {
        self.running = !self.running;
        if self.running {
            self.timer.schedule(now, Duration::ZERO);
        } else {
            self.timer.cancel();
        }
        info!(
            "simulation {} at generation {} ({:.2} gen/s)",
            if self.running { "started" } else { "stopped" },
            self.generation,
            self.rate
        );
        self.running
    }

    /// Raise the rate by one step, returns false when that would pass the maximum
    pub fn speed_up(&mut self) -> bool {
        let next = self.rate * self.acceleration;
        if next > self.max_rate {
            return false;
        }
        self.rate = next;
        info!("rate raised to {:.2} gen/s", self.rate);
        true
    }

    /// Lower the rate by one step. There is no floor.
    pub fn speed_down(&mut self) {
        self.rate /= self.acceleration;
        info!("rate lowered to {:.4} gen/s", self.rate);
    }

    /// Run one generation if the run is active and the timer has fired.
    ///
    /// The next step is due one interval after this one started, or right
    /// away if the step itself overran the interval. Missed intervals are
    /// not replayed.
    pub fn tick(&mut self, now: Instant) -> Option<Generation> {
        self.tick_with_clock(now, Instant::now)
    }

    /// `tick` with the step's finish time read from `clock` once the
    /// generation has been computed
    pub fn tick_with_clock(
        &mut self,
        now: Instant,
        clock: impl FnOnce() -> Instant,
    ) -> Option<Generation> {
        if !self.running || !self.timer.is_due(now) {
            return None;
        }

        let generation = self.advance();
        let finished = clock().max(now);
        let elapsed = finished.duration_since(now);
        let delay = self.interval().saturating_sub(elapsed);
        self.timer.schedule(finished, delay);
        Some(generation)
    }

    /// Single manual step, only while paused
    pub fn step_once(&mut self) -> Option<Generation> {
        if self.running {
            return None;
        }
        Some(self.advance())
    }

    /// Kill every cell, only while paused
    pub fn clear(&mut self) -> bool {
        if self.running {
            return false;
        }
        let removed = self.grid.clear();
        self.generation = 0;
        info!("cleared {} cells", removed.len());
        true
    }

    /// How long the caller may wait before the next `tick` can do anything
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        self.timer.remaining(now)
    }

    /// Time between generations at the current rate
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.rate).unwrap_or(Duration::MAX)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &SparseGrid<V> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SparseGrid<V> {
        &mut self.grid
    }

    fn advance(&mut self) -> Generation {
        let generation = self.grid.step();
        self.generation += 1;
        debug!(
            "generation {}: +{} -{} (population {}, frontier {})",
            self.generation,
            generation.born.len(),
            generation.died.len(),
            self.grid.population(),
            self.grid.frontier_len()
        );
        generation
    }
}
