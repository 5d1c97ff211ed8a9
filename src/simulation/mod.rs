mod grid;
mod history;
pub mod life;
pub mod smooth_life;

pub use grid::{wrap, Grid};
pub use history::History;
pub use life::Life;
pub use smooth_life::SmoothLife;

use rand::RngCore;

use crate::config::{Config, ModelKind};
use crate::error::SimError;

/// Shared contract of every automaton the driver can run.
///
/// One owner calls these in strict order per tick:
/// `step` → `record_snapshot` → `is_terminal`.
pub trait Simulation {
    fn kind(&self) -> ModelKind;

    fn config(&self) -> &Config;

    /// Seed the grid and clear the history.
    fn initialize(&mut self, rng: &mut dyn RngCore);

    /// Compute the kernel output for the whole grid and apply it.
    fn step(&mut self);

    /// Append a deep copy of the current grid to the history.
    fn record_snapshot(&mut self);

    /// Evaluated from current state on every call; never cached.
    fn is_terminal(&self) -> bool;

    fn grid(&self) -> &Grid;

    fn history(&self) -> &History;
}

impl ModelKind {
    /// Validate `config` for this model and build an unseeded simulation.
    pub fn build(self, config: Config) -> Result<Box<dyn Simulation>, SimError> {
        Ok(match self {
            ModelKind::SmoothLife => Box::new(SmoothLife::new(config)?),
            ModelKind::Conway => Box::new(Life::new(config)?),
        })
    }
}
