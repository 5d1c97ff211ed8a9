//! SmoothLife and Conway's Game of Life on a toroidal grid.
//!
//! ```no_run
//! use rand::SeedableRng;
//! use smooth_conway::{Config, ModelKind};
//!
//! let mut sim = ModelKind::SmoothLife.build(Config::new(64, 64))?;
//! sim.initialize(&mut rand::rngs::StdRng::seed_from_u64(7));
//! while !sim.is_terminal() {
//!     sim.step();
//!     sim.record_snapshot();
//! #   break;
//! }
//! # Ok::<(), smooth_conway::SimError>(())
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod output;
pub mod simulation;

pub use app::{App, RunOptions, RunSummary};
pub use config::{Config, ModelKind};
pub use error::SimError;
pub use simulation::{Grid, History, Simulation};
