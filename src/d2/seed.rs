//! Initial conditions: rectangles and single cells painted onto a grid.
//!
//! Coordinates are absolute cell positions; anything falling outside the
//! grid is clipped, so the reference layout can be painted on small grids.

use cgmath::Point2;

use super::{GridBuffer, SourceMask};
use crate::config::HeatConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    /// Half-open rectangle `min.x..max.x` by `min.y..max.y`.
    Rect { min: Point2<usize>, max: Point2<usize> },
    Cell(Point2<usize>),
}

impl Region {
    pub fn rect(min: (usize, usize), max: (usize, usize)) -> Self {
        Region::Rect {
            min: Point2::new(min.0, min.1),
            max: Point2::new(max.0, max.1),
        }
    }

    pub fn cell(x: usize, y: usize) -> Self {
        Region::Cell(Point2::new(x, y))
    }

    /// Cells of the region that lie inside a `dim` x `dim` grid.
    pub fn cells(&self, dim: usize) -> impl Iterator<Item = Point2<usize>> {
        let (min, max) = match *self {
            Region::Rect { min, max } => (min, max),
            Region::Cell(p) => {
                let end = Point2::new(p.x.saturating_add(1), p.y.saturating_add(1));
                (p, end)
            }
        };

        let xs = min.x.min(dim)..max.x.min(dim);
        (min.y.min(dim)..max.y.min(dim))
            .flat_map(move |y| xs.clone().map(move |x| Point2::new(x, y)))
    }
}

/// Regions painted in order; later regions overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    regions: Vec<(Region, f32)>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, region: Region, value: f32) -> Self {
        self.regions.push((region, value));
        self
    }

    pub fn paint(&self, grid: &mut GridBuffer) {
        let dim = grid.dim();
        for (region, value) in &self.regions {
            for p in region.cells(dim) {
                grid.set(p, *value);
            }
        }
    }

    pub fn to_grid(&self, dim: usize) -> GridBuffer {
        let mut grid = GridBuffer::new(dim);
        self.paint(&mut grid);
        grid
    }

    pub fn to_mask(&self, dim: usize) -> SourceMask {
        SourceMask::new(self.to_grid(dim))
    }
}

/// Constant sources: a large hot block, three cold cells, one lukewarm cell
/// and a cold block.
pub fn reference_sources(config: &HeatConfig) -> Layout {
    Layout::new()
        .with(Region::rect((301, 311), (600, 601)), config.max_temp)
        .with(Region::cell(100, 100), config.mid_temp())
        .with(Region::cell(100, 700), config.min_temp)
        .with(Region::cell(300, 300), config.min_temp)
        .with(Region::cell(700, 200), config.min_temp)
        .with(Region::rect((400, 800), (500, 900)), config.min_temp)
}

/// Starting field: zero except a hot block in the lower-left corner.
pub fn reference_initial(config: &HeatConfig) -> Layout {
    Layout::new().with(Region::rect((0, 800), (200, config.dim)), config.max_temp)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rect_is_half_open_and_clipped() {
        let cells: Vec<_> = Region::rect((1, 2), (3, 4)).cells(10).collect();
        assert_eq!(
            cells,
            vec![
                Point2::new(1, 2),
                Point2::new(2, 2),
                Point2::new(1, 3),
                Point2::new(2, 3)
            ]
        );

        assert_eq!(Region::rect((2, 2), (9, 9)).cells(4).count(), 4);
        assert_eq!(Region::cell(5, 0).cells(4).count(), 0);
        assert_eq!(Region::cell(usize::MAX, 0).cells(4).count(), 0);
        assert_eq!(Region::cell(1, usize::MAX).cells(4).count(), 0);
    }

    #[test]
    fn test_later_regions_win() {
        let grid = Layout::new()
            .with(Region::rect((0, 0), (3, 3)), 1.0)
            .with(Region::cell(1, 1), 0.5)
            .to_grid(3);

        assert_eq!(grid.get(Point2::new(1, 1)), 0.5);
        assert_eq!(grid.get(Point2::new(2, 2)), 1.0);
    }

    #[test]
    fn test_reference_layout() {
        let config = HeatConfig::default();
        let mask = reference_sources(&config).to_mask(config.dim);

        assert_eq!(mask.get(Point2::new(301, 311)), 1.0);
        assert_eq!(mask.get(Point2::new(599, 600)), 1.0);
        assert_eq!(mask.get(Point2::new(300, 311)), 0.0);
        assert_eq!(mask.get(Point2::new(100, 100)), config.mid_temp());
        assert_eq!(mask.get(Point2::new(700, 200)), config.min_temp);
        assert_eq!(mask.get(Point2::new(450, 850)), config.min_temp);
        assert_eq!(mask.pinned_count(), 299 * 290 + 4 + 100 * 100);

        let initial = reference_initial(&config).to_grid(config.dim);
        assert_eq!(initial.get(Point2::new(0, 1023)), 1.0);
        assert_eq!(initial.get(Point2::new(199, 800)), 1.0);
        assert_eq!(initial.get(Point2::new(200, 800)), 0.0);
        assert_eq!(initial.get(Point2::new(0, 799)), 0.0);
    }
}
