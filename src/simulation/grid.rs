/// Toroidal coordinate wrap. Always lands in `[0, dimension)`, negative
/// offsets included.
#[inline]
pub fn wrap(coordinate: isize, dimension: usize) -> usize {
    debug_assert!(dimension > 0);
    coordinate.rem_euclid(dimension as isize) as usize
}

/// Row-major scalar field on a torus.
///
/// Also used for the per-step delta / next-state buffer, which has the same
/// shape as the live grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Vec<f64>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid with every cell at 0
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Build a grid from rows of equal length.
    ///
    /// Panics if the rows are ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.len(), width, "ragged rows");
            cells.extend_from_slice(row);
        }
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let i = self.idx(x, y);
        self.cells[i] = value;
    }

    /// Read a cell at a possibly out-of-range offset, wrapping both axes.
    #[inline]
    pub fn get_wrapped(&self, x: isize, y: isize) -> f64 {
        self.get(wrap(x, self.width), wrap(y, self.height))
    }

    /// Raw row-major cell values
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, and a zero-width grid has no rows anyway
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    pub fn fill(&mut self, value: f64) {
        self.cells.fill(value);
    }

    /// True when every cell is exactly 0.0 (no tolerance).
    pub fn is_all_zero(&self) -> bool {
        self.cells.iter().all(|&v| v == 0.0)
    }

    /// Largest cell value, or 0 for an empty grid.
    pub fn max_value(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }
}
