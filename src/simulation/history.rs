use crate::simulation::grid::Grid;

/// Append-only sequence of grid snapshots, one per completed step.
#[derive(Clone, Debug, Default)]
pub struct History {
    frames: Vec<Grid>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a deep copy of `grid`. Later edits to `grid` do not reach it.
    pub fn record(&mut self, grid: &Grid) {
        self.frames.push(grid.clone());
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Grid] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Grid> {
        self.frames.last()
    }

    /// The two most recent snapshots as `(previous, latest)`.
    pub fn last_two(&self) -> Option<(&Grid, &Grid)> {
        match self.frames.as_slice() {
            [.., previous, latest] => Some((previous, latest)),
            _ => None,
        }
    }

    /// Largest value across every recorded frame, 0 when empty.
    pub fn max_value(&self) -> f64 {
        self.frames.iter().map(Grid::max_value).fold(0.0, f64::max)
    }
}
