use cgmath::{Point2, Vector2};
use ndarray::{Array, Array2, Zip};

use crate::error::HeatError;

mod buffer;
pub mod seed;

pub use buffer::DoubleBuffer;

pub const NORTH: Vector2<isize> = Vector2 { x: 0, y: -1 };
pub const SOUTH: Vector2<isize> = Vector2 { x: 0, y: 1 };
pub const WEST: Vector2<isize> = Vector2 { x: -1, y: 0 };
pub const EAST: Vector2<isize> = Vector2 { x: 1, y: 0 };

/// Flat row-major index of `p` in a `dim` x `dim` grid.
#[inline]
pub fn index_of(dim: usize, p: Point2<usize>) -> usize {
    assert!(p.x < dim && p.y < dim, "cell {:?} outside {}x{} grid", p, dim, dim);
    p.x + p.y * dim
}

/// Inverse of [`index_of`].
#[inline]
pub fn cell_at(dim: usize, index: usize) -> Point2<usize> {
    debug_assert!(index < dim * dim);
    Point2::new(index % dim, index / dim)
}

/// The cell at `p + offset`, or `p` itself when that lies outside the grid.
///
/// Edges neither wrap nor reflect: an outside neighbour contributes the
/// cell's own value to the stencil.
#[inline]
pub fn neighbour(dim: usize, p: Point2<usize>, offset: Vector2<isize>) -> Point2<usize> {
    let x = p.x as isize + offset.x;
    let y = p.y as isize + offset.y;

    if x < 0 || y < 0 || x >= dim as isize || y >= dim as isize {
        p
    } else {
        Point2::new(x as usize, y as usize)
    }
}

/// One square snapshot of the temperature field.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBuffer {
    cells: Array2<f32>,
}

impl GridBuffer {
    /// Zero-filled `dim` x `dim` grid.
    pub fn new(dim: usize) -> Self {
        Self {
            cells: Array::zeros((dim, dim)),
        }
    }

    /// Grid from row-major host data.
    pub fn from_vec(dim: usize, data: Vec<f32>) -> Result<Self, HeatError> {
        let actual = data.len();
        let cells = Array::from_shape_vec((dim, dim), data)
            .map_err(|_| HeatError::BufferLength { dim, actual })?;

        Ok(Self { cells })
    }

    pub fn dim(&self) -> usize {
        self.cells.nrows()
    }

    pub fn get(&self, p: Point2<usize>) -> f32 {
        self.as_slice()[index_of(self.dim(), p)]
    }

    pub fn set(&mut self, p: Point2<usize>, value: f32) {
        let i = index_of(self.dim(), p);
        self.as_mut_slice()[i] = value;
    }

    /// Cells indexed `[[y, x]]`.
    pub fn cells(&self) -> &Array2<f32> {
        &self.cells
    }

    /// Row-major view of the cells, `x + y * dim`.
    pub fn as_slice(&self) -> &[f32] {
        // only ever built by `zeros` or `from_shape_vec`, never re-strided
        self.cells
            .as_slice()
            .expect("grid is always in standard layout")
    }

    fn as_mut_slice(&mut self) -> &mut [f32] {
        self.cells
            .as_slice_mut()
            .expect("grid is always in standard layout")
    }

    /// Row-major copy of the grid, as handed to a host.
    pub fn to_vec(&self) -> Vec<f32> {
        self.as_slice().to_vec()
    }

    /// Address of the backing allocation. Two grids share it only if they are the same grid.
    pub fn as_ptr(&self) -> *const f32 {
        self.cells.as_ptr()
    }
}

/// Constant temperature sources. A cell value of exactly zero is inert.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMask {
    values: GridBuffer,
}

impl SourceMask {
    pub fn new(values: GridBuffer) -> Self {
        Self { values }
    }

    pub fn dim(&self) -> usize {
        self.values.dim()
    }

    pub fn get(&self, p: Point2<usize>) -> f32 {
        self.values.get(p)
    }

    pub fn is_pinned(&self, p: Point2<usize>) -> bool {
        self.get(p) != 0.0
    }

    /// Pinned cells and their values, in row-major order.
    pub fn pinned(&self) -> impl Iterator<Item = (Point2<usize>, f32)> + '_ {
        let dim = self.dim();
        self.values
            .as_slice()
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(move |(i, &v)| (cell_at(dim, i), v))
    }

    pub fn pinned_count(&self) -> usize {
        self.pinned().count()
    }

    pub fn values(&self) -> &GridBuffer {
        &self.values
    }
}

/// Diffuse `input` into `output` with the explicit four-neighbour stencil:
///
/// ```text
/// out = c + speed * (n + s + w + e - 4 * c)
/// ```
///
/// Every cell reads only `input`, so cells are computed independently and in
/// parallel when `parallel` is set. Returns once every cell is written.
pub fn diffuse_into(input: &GridBuffer, output: &mut GridBuffer, speed: f32, parallel: bool) {
    assert_eq!(input.dim(), output.dim());

    let dim = input.dim();
    let src = &input.cells;

    let kernel = |(y, x): (usize, usize), out: &mut f32| {
        let p = Point2::new(x, y);
        let at = |offset| {
            let q = neighbour(dim, p, offset);
            src[[q.y, q.x]]
        };

        let c = src[[y, x]];
        *out = c + speed * (at(NORTH) + at(SOUTH) + at(WEST) + at(EAST) - 4.0 * c);
    };

    let zip = Zip::indexed(&mut output.cells);
    if parallel {
        zip.par_for_each(kernel);
    } else {
        zip.for_each(kernel);
    }
}

/// Overwrite every pinned cell of `grid` with its source value.
pub fn clamp_sources(grid: &mut GridBuffer, mask: &SourceMask, parallel: bool) {
    assert_eq!(grid.dim(), mask.dim());

    let pin = |cell: &mut f32, &source: &f32| {
        if source != 0.0 {
            *cell = source;
        }
    };

    let zip = Zip::from(&mut grid.cells).and(&mask.values.cells);
    if parallel {
        zip.par_for_each(pin);
    } else {
        zip.for_each(pin);
    }
}
