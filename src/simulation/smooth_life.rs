//! Continuous reaction-diffusion automaton (SmoothLife).
//!
//! Each cell samples the mean of an inner disc (`m`) and of the surrounding
//! annulus (`n`). A pair of smooth step functions turns `(n, m)` into a
//! birth/survival value `q` in `[0, 1]`, and the grid is integrated towards
//! `2q - 1` with step size `dt`, clamped to `[0, 1]`.

use rand::{Rng, RngCore};

use crate::config::{Config, ModelKind, MAX_INFLUENCE_RADIUS};
use crate::error::SimError;
use crate::simulation::grid::Grid;
use crate::simulation::history::History;
use crate::simulation::Simulation;

/// Smooth step centred on `a` with width `alpha`.
#[inline]
pub fn sigmoid(x: f64, a: f64, alpha: f64) -> f64 {
    1.0 / (1.0 + (-(x - a) * 4.0 / alpha).exp())
}

/// Blend a birth threshold `b` into a death threshold `d` as the inner
/// filling `m` crosses 0.5.
#[inline]
pub fn component_m(b: f64, d: f64, m: f64, alpha: f64) -> f64 {
    let s = sigmoid(m, 0.5, alpha);
    b * (1.0 - s) + d * s
}

/// Soft indicator of `n` lying inside `[low, high]`.
#[inline]
pub fn component_n(n: f64, low: f64, high: f64, alpha: f64) -> f64 {
    sigmoid(n, low, alpha) * (1.0 - sigmoid(n, high, alpha))
}

/// Transition value `q` for outer filling `n` and inner filling `m`.
pub fn reaction(n: f64, m: f64, config: &Config) -> f64 {
    let low = component_m(config.threshold_b1, config.threshold_d1, m, config.alpha_m);
    let high = component_m(config.threshold_b2, config.threshold_d2, m, config.alpha_m);
    component_n(n, low, high, config.alpha_n)
}

/// Precomputed sampling offsets for the inner disc and outer annulus.
///
/// The search window is the square `|dx|, |dy| <= floor(radius) - 1`; within
/// it a cell belongs to the disc when `dx² + dy² <= floor(radius² / 9)` and
/// to the annulus when it is outside the disc and `dx² + dy² <= floor(radius²)`.
#[derive(Clone, Debug)]
pub struct Neighbourhood {
    inner: Vec<(isize, isize)>,
    outer: Vec<(isize, isize)>,
}

impl Neighbourhood {
    pub fn new(radius: f64) -> Result<Self, SimError> {
        if !(1.0..=MAX_INFLUENCE_RADIUS).contains(&radius) {
            return Err(SimError::InvalidConfiguration(format!(
                "influence radius must lie in [1, {}], got {}",
                MAX_INFLUENCE_RADIUS, radius
            )));
        }

        let offset = radius.floor() as isize - 1;
        let inner_limit = (radius * radius / 9.0).floor() as isize;
        let outer_limit = (radius * radius).floor() as isize;

        let mut inner = Vec::new();
        let mut outer = Vec::new();
        // Row-major order keeps the summation order stable between runs.
        for dy in -offset..=offset {
            for dx in -offset..=offset {
                let d2 = dx * dx + dy * dy;
                if d2 <= inner_limit {
                    inner.push((dx, dy));
                } else if d2 <= outer_limit {
                    outer.push((dx, dy));
                }
            }
        }

        if inner.is_empty() || outer.is_empty() {
            return Err(SimError::InvalidConfiguration(format!(
                "influence radius {} gives an empty neighbourhood (inner {} cells, outer {} cells)",
                radius,
                inner.len(),
                outer.len()
            )));
        }

        Ok(Self { inner, outer })
    }

    pub fn inner_len(&self) -> usize {
        self.inner.len()
    }

    pub fn outer_len(&self) -> usize {
        self.outer.len()
    }

    /// Mean of the inner disc and the outer annulus around `(cx, cy)`,
    /// returned as `(m, n)`.
    pub fn fillings(&self, grid: &Grid, cx: usize, cy: usize) -> (f64, f64) {
        let mean = |offsets: &[(isize, isize)]| {
            let sum: f64 = offsets
                .iter()
                .map(|&(dx, dy)| grid.get_wrapped(cx as isize + dx, cy as isize + dy))
                .sum();
            sum / offsets.len() as f64
        };
        (mean(self.inner.as_slice()), mean(self.outer.as_slice()))
    }
}

/// Fill `delta` with `2q - 1` for every cell of `grid`.
pub fn compute_delta(grid: &Grid, neighbourhood: &Neighbourhood, config: &Config, delta: &mut Grid) {
    debug_assert_eq!((grid.width(), grid.height()), (delta.width(), delta.height()));
    for cy in 0..grid.height() {
        for cx in 0..grid.width() {
            let (m, n) = neighbourhood.fillings(grid, cx, cy);
            let q = reaction(n, m, config);
            delta.set(cx, cy, 2.0 * q - 1.0);
        }
    }
}

/// Integrate `delta` into `grid` with step `dt`, saturating at `[0, 1]`.
pub fn apply_delta(grid: &mut Grid, delta: &Grid, dt: f64) {
    for (cell, d) in grid.cells_mut().iter_mut().zip(delta.cells()) {
        *cell = (*cell + dt * d).clamp(0.0, 1.0);
    }
}

/// SmoothLife model: owns the live grid, the delta buffer and the history.
pub struct SmoothLife {
    config: Config,
    neighbourhood: Neighbourhood,
    grid: Grid,
    delta: Grid,
    history: History,
}

impl SmoothLife {
    /// Validate `config` and allocate an all-zero grid.
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.validate(ModelKind::SmoothLife)?;
        let neighbourhood = Neighbourhood::new(config.influence_radius)?;
        log::debug!(
            "SmoothLife neighbourhood: {} inner cells, {} outer cells",
            neighbourhood.inner_len(),
            neighbourhood.outer_len()
        );

        Ok(Self {
            grid: Grid::new(config.width, config.height),
            delta: Grid::new(config.width, config.height),
            history: History::new(),
            neighbourhood,
            config,
        })
    }

    pub fn delta(&self) -> &Grid {
        &self.delta
    }

    /// Live grid, for hand-built starting states.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

impl Simulation for SmoothLife {
    fn kind(&self) -> ModelKind {
        ModelKind::SmoothLife
    }

    fn config(&self) -> &Config {
        &self.config
    }

    /// Random values in `[0, 1)` over a centred `width/3 x height/3` block,
    /// zero everywhere else.
    fn initialize(&mut self, rng: &mut dyn RngCore) {
        self.grid.fill(0.0);
        self.delta.fill(0.0);
        self.history.clear();

        let (width, height) = (self.config.width, self.config.height);
        let (w, h) = (width / 3, height / 3);
        for dy in 0..h {
            for dx in 0..w {
                let x = dx + width / 2 - w / 2;
                let y = dy + height / 2 - h / 2;
                self.grid.set(x, y, rng.gen::<f64>());
            }
        }
    }

    fn step(&mut self) {
        compute_delta(&self.grid, &self.neighbourhood, &self.config, &mut self.delta);
        apply_delta(&mut self.grid, &self.delta, self.config.dt);
    }

    fn record_snapshot(&mut self) {
        self.history.record(&self.grid);
    }

    /// Every cell exactly 0.0.
    fn is_terminal(&self) -> bool {
        self.grid.is_all_zero()
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sigmoid_midpoint() {
        assert!((sigmoid(0.3, 0.3, 0.028) - 0.5).abs() < 1e-12);
        assert!(sigmoid(1.0, 0.3, 0.028) > 0.999);
        assert!(sigmoid(-1.0, 0.3, 0.028) < 0.001);
    }

    #[test]
    fn test_component_m_blends_thresholds() {
        // Empty inner disc picks the birth threshold, full disc the death one.
        assert!((component_m(0.278, 0.267, 0.0, 0.147) - 0.278).abs() < 1e-4);
        assert!((component_m(0.278, 0.267, 1.0, 0.147) - 0.267).abs() < 1e-4);
        assert!((component_m(0.2, 0.4, 0.5, 0.147) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_reaction_birth_interval() {
        let config = Config::new(10, 10);
        let inside = reaction(0.32, 0.0, &config);
        assert!(inside > 0.9, "q = {}", inside);

        let empty = reaction(0.0, 0.0, &config);
        assert!(empty < 0.01, "q = {}", empty);

        let crowded = reaction(0.9, 0.0, &config);
        assert!(crowded < 0.01, "q = {}", crowded);
    }

    #[test]
    fn test_reaction_in_unit_interval() {
        let config = Config::new(10, 10);
        for i in 0..=20 {
            for j in 0..=20 {
                let q = reaction(i as f64 / 20.0, j as f64 / 20.0, &config);
                assert!((0.0..=1.0).contains(&q));
            }
        }
    }

    #[test]
    fn test_neighbourhood_default_radius() {
        let hood = Neighbourhood::new(11.0).unwrap();
        // floor(121 / 9) = 13: lattice points with dx² + dy² <= 13
        assert_eq!(hood.inner_len(), 45);
        // 21x21 window minus the disc; every d² <= 200 except the corners
        let window_points_within_121 = (-10isize..=10)
            .flat_map(|dy| (-10isize..=10).map(move |dx| dx * dx + dy * dy))
            .filter(|&d2| d2 <= 121)
            .count();
        assert_eq!(hood.outer_len(), window_points_within_121 - 45);
    }

    #[test]
    fn test_neighbourhood_small_radius() {
        let hood = Neighbourhood::new(3.0).unwrap();
        assert_eq!(hood.inner_len(), 5);
        assert_eq!(hood.outer_len(), 20);

        let hood = Neighbourhood::new(2.0).unwrap();
        assert_eq!(hood.inner_len(), 1);
        assert_eq!(hood.outer_len(), 8);
    }

    #[test]
    fn test_degenerate_radius_rejected() {
        for radius in [0.0, 0.5, 1.0, 1.9, -3.0, f64::INFINITY, 1.0e5, 4.0e9] {
            assert!(
                matches!(Neighbourhood::new(radius), Err(SimError::InvalidConfiguration(_))),
                "radius {} accepted",
                radius
            );
        }

        let config = Config {
            influence_radius: 1.5,
            ..Config::new(8, 8)
        };
        assert!(SmoothLife::new(config).is_err());

        let config = Config {
            influence_radius: 4.0e9,
            ..Config::new(8, 8)
        };
        assert!(matches!(
            SmoothLife::new(config),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_compute_delta_matches_direct_sum() {
        let config = Config {
            influence_radius: 3.0,
            ..Config::new(7, 7)
        };
        let mut grid = Grid::new(7, 7);
        for (i, cell) in grid.cells_mut().iter_mut().enumerate() {
            *cell = ((i * 37) % 11) as f64 / 10.0;
        }

        let hood = Neighbourhood::new(config.influence_radius).unwrap();
        let mut delta = Grid::new(7, 7);
        compute_delta(&grid, &hood, &config, &mut delta);

        let r = config.influence_radius;
        let reach = (r - 1.0) as isize;
        for (cx, cy) in [(0usize, 0usize), (3, 3), (6, 1)] {
            let (mut m, mut m_count, mut n, mut n_count) = (0.0, 0.0, 0.0, 0.0);
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    let x = ((cx as isize + dx) % 7 + 7) % 7;
                    let y = ((cy as isize + dy) % 7 + 7) % 7;
                    let v = grid.get(x as usize, y as usize);
                    let d2 = dx * dx + dy * dy;
                    if d2 <= (r * r / 9.0) as isize {
                        m += v;
                        m_count += 1.0;
                    } else if d2 <= (r * r) as isize {
                        n += v;
                        n_count += 1.0;
                    }
                }
            }
            let expected = 2.0 * reaction(n / n_count, m / m_count, &config) - 1.0;
            let got = delta.get(cx, cy);
            assert!(
                (got - expected).abs() < 1e-12,
                "cell ({}, {}): {} != {}",
                cx,
                cy,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_fillings_wrap_around() {
        let hood = Neighbourhood::new(2.0).unwrap();
        let mut grid = Grid::new(5, 5);
        // Diagonal neighbour of (0, 0) across both edges
        grid.set(4, 4, 1.0);
        let (m, n) = hood.fillings(&grid, 0, 0);
        assert_eq!(m, 0.0);
        assert!((n - 1.0 / 8.0).abs() < 1e-12);

        grid.set(0, 0, 1.0);
        let (m, _) = hood.fillings(&grid, 0, 0);
        assert_eq!(m, 1.0);
    }

    #[test]
    fn test_initialize_seeds_centre_block() {
        let mut sim = SmoothLife::new(Config::new(30, 12)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        sim.initialize(&mut rng);

        // Block is 10x4 starting at (15 - 5, 6 - 2)
        for y in 0..12 {
            for x in 0..30 {
                let v = sim.grid().get(x, y);
                let in_block = (10..20).contains(&x) && (4..8).contains(&y);
                if in_block {
                    assert!((0.0..1.0).contains(&v));
                } else {
                    assert_eq!(v, 0.0, "cell ({}, {}) outside the seed block", x, y);
                }
            }
        }
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_step_clamps_to_unit_interval() {
        let config = Config {
            dt: 50.0,
            ..Config::new(16, 16)
        };
        let mut sim = SmoothLife::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        sim.initialize(&mut rng);

        for _ in 0..3 {
            sim.step();
            assert!(sim.grid().cells().iter().all(|v| (0.0..=1.0).contains(v)));
        }
        assert!(sim.delta().cells().iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_apply_delta_saturates() {
        let mut grid = Grid::from_rows(&[vec![0.0, 0.5, 1.0]]);
        let delta = Grid::from_rows(&[vec![-1.0, 1.0, 1.0]]);
        apply_delta(&mut grid, &delta, 0.1);
        assert_eq!(grid.get(0, 0), 0.0);
        assert!((grid.get(1, 0) - 0.6).abs() < 1e-12);
        assert_eq!(grid.get(2, 0), 1.0);
    }

    #[test]
    fn test_deterministic_with_seeded_rng() {
        let run = || {
            let mut sim = SmoothLife::new(Config::new(24, 24)).unwrap();
            let mut rng = StdRng::seed_from_u64(42);
            sim.initialize(&mut rng);
            for _ in 0..4 {
                sim.step();
            }
            sim.grid().clone()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_zero_grid_is_terminal_and_stays_zero() {
        let mut sim = SmoothLife::new(Config::new(12, 12)).unwrap();
        assert!(sim.is_terminal());

        sim.step();
        assert!(sim.grid().is_all_zero());
        assert!(sim.is_terminal());
    }

    #[test]
    fn test_terminal_requires_exact_zero() {
        let mut sim = SmoothLife::new(Config::new(6, 6)).unwrap();
        sim.grid_mut().set(2, 3, 1e-300);
        assert!(!sim.is_terminal());
        assert_eq!(sim.is_terminal(), sim.is_terminal());
    }

    #[test]
    fn test_history_integrity() {
        let mut sim = SmoothLife::new(Config::new(15, 15)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        sim.initialize(&mut rng);

        for _ in 0..5 {
            sim.step();
            sim.record_snapshot();
        }
        assert_eq!(sim.history().len(), 5);

        let recorded = sim.history().frames().to_vec();
        sim.grid_mut().fill(0.75);
        assert_eq!(sim.history().frames(), recorded.as_slice());
        assert_ne!(sim.history().last(), Some(sim.grid()));
    }

    #[test]
    fn test_initialize_clears_history() {
        let mut sim = SmoothLife::new(Config::new(9, 9)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        sim.initialize(&mut rng);
        sim.step();
        sim.record_snapshot();
        assert_eq!(sim.history().len(), 1);

        sim.initialize(&mut rng);
        assert!(sim.history().is_empty());
    }
}
