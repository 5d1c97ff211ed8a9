//! Conway's Game of Life (B3/S23) on the same scalar grid, cells 0.0 or 1.0.

use rand::{Rng, RngCore};

use crate::config::{Config, ModelKind};
use crate::error::SimError;
use crate::simulation::grid::Grid;
use crate::simulation::history::History;
use crate::simulation::Simulation;

const ALIVE: f64 = 1.0;
const DEAD: f64 = 0.0;

/// Live cells among the 8 wrapped Moore neighbours of `(x, y)`.
pub fn live_neighbours(grid: &Grid, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for dy in -1isize..=1 {
        for dx in -1isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if grid.get_wrapped(x as isize + dx, y as isize + dy) == ALIVE {
                count += 1;
            }
        }
    }
    count
}

/// Write the next generation of `grid` into `next`.
pub fn next_state(grid: &Grid, next: &mut Grid) {
    debug_assert_eq!((grid.width(), grid.height()), (next.width(), next.height()));
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let alive = grid.get(x, y) == ALIVE;
            let value = match (alive, live_neighbours(grid, x, y)) {
                (true, 2) | (true, 3) => ALIVE,
                (false, 3) => ALIVE,
                _ => DEAD,
            };
            next.set(x, y, value);
        }
    }
}

/// Game of Life model.
///
/// Only detects still lifes: a blinker or any other oscillator never
/// reports terminal, since only the last two snapshots are compared.
pub struct Life {
    config: Config,
    grid: Grid,
    next: Grid,
    history: History,
}

impl Life {
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.validate(ModelKind::Conway)?;
        Ok(Self {
            grid: Grid::new(config.width, config.height),
            next: Grid::new(config.width, config.height),
            history: History::new(),
            config,
        })
    }

    /// Live grid, for hand-built starting states.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

impl Simulation for Life {
    fn kind(&self) -> ModelKind {
        ModelKind::Conway
    }

    fn config(&self) -> &Config {
        &self.config
    }

    /// Each cell alive with probability 1/2.
    fn initialize(&mut self, rng: &mut dyn RngCore) {
        self.history.clear();
        self.next.fill(DEAD);
        for cell in self.grid.cells_mut() {
            *cell = if rng.gen::<bool>() { ALIVE } else { DEAD };
        }
    }

    fn step(&mut self) {
        next_state(&self.grid, &mut self.next);
        std::mem::swap(&mut self.grid, &mut self.next);
    }

    fn record_snapshot(&mut self) {
        self.history.record(&self.grid);
    }

    /// The last two recorded snapshots are identical.
    fn is_terminal(&self) -> bool {
        self.history
            .last_two()
            .is_some_and(|(previous, latest)| previous == latest)
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn history(&self) -> &History {
        &self.history
    }
}
