use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::SimError;
use crate::output;
use crate::simulation::Simulation;

/// Driver settings, independent of the model parameters.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Pause after each non-terminal step
    pub step_delay: Duration,
    /// Stop after this many steps even if no end state was reached
    pub max_steps: Option<usize>,
    /// Render each step to the output writer
    pub display: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(crate::config::DEFAULT_STEP_DELAY_MS),
            max_steps: None,
            display: true,
        }
    }
}

/// Outcome of [`App::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    /// False when the run stopped on `max_steps` instead
    pub terminal: bool,
}

/// Owns one seeded simulation and drives it tick by tick.
pub struct App {
    sim: Box<dyn Simulation>,
    options: RunOptions,
    step_rate: StepRate,
}

impl App {
    pub fn new(sim: Box<dyn Simulation>, options: RunOptions) -> Self {
        Self {
            sim,
            options,
            step_rate: StepRate::new(),
        }
    }

    pub fn simulation(&self) -> &dyn Simulation {
        self.sim.as_ref()
    }

    /// Step → record → render → end check, until the model reports its end
    /// state or `max_steps` is hit.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary, SimError> {
        let config = self.sim.config();
        log::info!(
            "Running {} on a {}x{} grid",
            self.sim.kind(),
            config.width,
            config.height
        );

        let mut steps = 0;
        loop {
            if self.options.max_steps.is_some_and(|max| steps >= max) {
                log::warn!("Stopped after {} steps without reaching an end state", steps);
                return Ok(RunSummary {
                    steps,
                    terminal: false,
                });
            }

            self.sim.step();
            self.sim.record_snapshot();
            steps += 1;

            if self.options.display {
                output::display(out, self.sim.grid())?;
            }

            if let Some(rate) = self.step_rate.tick() {
                log::debug!("step {}: {:.1} steps/s", steps, rate);
            }

            if self.sim.is_terminal() {
                log::info!("End state reached after {} steps", steps);
                writeln!(out, "{}", output::finished_message(self.sim.kind()))?;
                return Ok(RunSummary {
                    steps,
                    terminal: true,
                });
            }

            if !self.options.step_delay.is_zero() {
                thread::sleep(self.options.step_delay);
            }
        }
    }

    /// Write the recorded history as an SVG animation.
    pub fn export(&self, path: &Path) -> Result<(), SimError> {
        output::export_animation(self.sim.history(), self.sim.config(), path)
    }
}

/// Steps-per-second counter, reports once a second.
struct StepRate {
    last_update: Instant,
    step_count: u32,
}

impl StepRate {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            step_count: 0,
        }
    }

    fn tick(&mut self) -> Option<f64> {
        self.step_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let rate = self.step_count as f64 / elapsed.as_secs_f64();
            self.step_count = 0;
            self.last_update = Instant::now();
            Some(rate)
        } else {
            None
        }
    }
}
