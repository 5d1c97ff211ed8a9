use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

// ============================================
// SmoothLife Parameters
// ============================================

/// Outer sampling radius in cells. The inner disc uses a third of it.
pub const DEFAULT_INFLUENCE_RADIUS: f64 = 11.0;

/// Largest accepted radius. The sampling window holds about `(2R)²` offsets.
pub const MAX_INFLUENCE_RADIUS: f64 = 1024.0;

/// Sigmoid steepness for the outer (annulus) filling
pub const DEFAULT_ALPHA_N: f64 = 0.028;

/// Sigmoid steepness for the inner (disc) filling
pub const DEFAULT_ALPHA_M: f64 = 0.147;

/// Birth interval
pub const DEFAULT_THRESHOLD_B1: f64 = 0.278;
pub const DEFAULT_THRESHOLD_B2: f64 = 0.365;

/// Survival interval
pub const DEFAULT_THRESHOLD_D1: f64 = 0.267;
pub const DEFAULT_THRESHOLD_D2: f64 = 0.445;

/// Integration step size
pub const DEFAULT_DT: f64 = 0.05;

// ============================================
// Driver / Output
// ============================================

/// Pause between steps so the terminal animation stays readable
pub const DEFAULT_STEP_DELAY_MS: u64 = 100;

/// Display time of one frame in the exported SVG animation
pub const SVG_FRAME_MS: u64 = 100;

/// Default path of the exported animation
pub const DEFAULT_OUTPUT_PATH: &str = "animation.svg";

/// Which automaton drives the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    /// Continuous reaction-diffusion (SmoothLife)
    SmoothLife,
    /// Discrete binary Game of Life
    Conway,
}

impl FromStr for ModelKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smoothlife" | "smooth-life" | "smooth" => Ok(ModelKind::SmoothLife),
            "conway" | "life" => Ok(ModelKind::Conway),
            _ => Err(SimError::UnknownModel(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::SmoothLife => write!(f, "smoothlife"),
            ModelKind::Conway => write!(f, "conway"),
        }
    }
}

/// Immutable parameter set for one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub influence_radius: f64,
    pub alpha_n: f64,
    pub alpha_m: f64,
    pub threshold_b1: f64,
    pub threshold_b2: f64,
    pub threshold_d1: f64,
    pub threshold_d2: f64,
    pub dt: f64,
}

impl Config {
    /// Config of the given size with every other field at its default.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reject parameter sets that cannot drive the given model.
    ///
    /// The radius checks only apply to SmoothLife; Conway ignores every
    /// field except the dimensions.
    pub fn validate(&self, kind: ModelKind) -> Result<(), SimError> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if kind == ModelKind::SmoothLife {
            if !(1.0..=MAX_INFLUENCE_RADIUS).contains(&self.influence_radius) {
                return Err(SimError::InvalidConfiguration(format!(
                    "influence radius must lie in [1, {}], got {}",
                    MAX_INFLUENCE_RADIUS, self.influence_radius
                )));
            }
            if !self.dt.is_finite() || self.dt <= 0.0 {
                return Err(SimError::InvalidConfiguration(format!(
                    "dt must be a finite positive value, got {}",
                    self.dt
                )));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            alpha_n: DEFAULT_ALPHA_N,
            alpha_m: DEFAULT_ALPHA_M,
            threshold_b1: DEFAULT_THRESHOLD_B1,
            threshold_b2: DEFAULT_THRESHOLD_B2,
            threshold_d1: DEFAULT_THRESHOLD_D1,
            threshold_d2: DEFAULT_THRESHOLD_D2,
            dt: DEFAULT_DT,
        }
    }
}
