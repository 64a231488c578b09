use cgmath::Point2;
use heatgrid::d2::seed::{Layout, Region};
use heatgrid::d2::{clamp_sources, GridBuffer};
use heatgrid::{HeatConfig, HeatError, Simulation};

fn config(dim: usize, substeps: usize, parallel: bool) -> HeatConfig {
    HeatConfig {
        dim,
        substeps_per_frame: substeps,
        parallel,
        ..HeatConfig::default()
    }
}

fn corner_source(parallel: bool) -> Simulation {
    let mask = Layout::new().with(Region::cell(0, 0), 1.0).to_mask(4);
    Simulation::new(config(4, 1, parallel), mask, GridBuffer::new(4)).unwrap()
}

#[test]
fn one_substep_from_corner_source() {
    for &parallel in &[false, true] {
        let mut sim = corner_source(parallel);
        sim.step();

        #[rustfmt::skip]
        let expected = vec![
            0.5,  0.25, 0.0, 0.0,
            0.25, 0.0,  0.0, 0.0,
            0.0,  0.0,  0.0, 0.0,
            0.0,  0.0,  0.0, 0.0,
        ];
        assert_eq!(sim.current().to_vec(), expected);

        // the next substep starts by re-pinning the source
        let mut pinned = sim.current().clone();
        clamp_sources(&mut pinned, sim.mask(), parallel);
        assert_eq!(pinned.get(Point2::new(0, 0)), 1.0);
        assert_eq!(pinned.get(Point2::new(1, 0)), 0.25);
    }
}

#[test]
fn frame_presents_the_stepped_grid() {
    let mut sim = corner_source(false);
    let mut seen = Vec::new();

    let mut bridge = |frame: usize, grid: &GridBuffer| -> Result<(), HeatError> {
        seen.push((frame, grid.to_vec()));
        Ok(())
    };
    sim.advance_frame(0, &mut bridge).unwrap();
    sim.advance_frame(1, &mut bridge).unwrap();

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].1[0], 0.5);
    assert_eq!(seen[0].1[1], 0.25);

    // second substep: (0,0) is re-pinned to 1.0 before diffusing
    assert_eq!(seen[1].1[0], 1.0 + 0.25 * (1.0 + 0.25 + 1.0 + 0.25 - 4.0));
    assert_eq!(seen[1].1[1], 0.25 + 0.25 * (0.25 + 0.0 + 1.0 + 0.0 - 4.0 * 0.25));
}

#[test]
fn serial_and_parallel_agree_over_frames() {
    let layout = Layout::new()
        .with(Region::rect((3, 3), (9, 7)), 1.0)
        .with(Region::cell(20, 5), 0.0001)
        .with(Region::cell(1, 30), 0.5);
    let initial = Layout::new().with(Region::rect((0, 24), (10, 32)), 1.0);

    let mut runs = Vec::new();
    for &parallel in &[false, true] {
        let mut sim = Simulation::new(
            config(32, 17, parallel),
            layout.to_mask(32),
            initial.to_grid(32),
        )
        .unwrap();

        let mut frames = Vec::new();
        for frame in 0..4 {
            let mut bridge = |_: usize, grid: &GridBuffer| -> Result<(), HeatError> {
                frames.push(grid.clone());
                Ok(())
            };
            sim.advance_frame(frame, &mut bridge).unwrap();
        }
        runs.push(frames);
    }

    assert_eq!(runs[0], runs[1]);
}

#[test]
fn at_rest_field_stays_zero() {
    let mask = Layout::new().to_mask(16);
    let mut sim = Simulation::new(config(16, 90, true), mask, GridBuffer::new(16)).unwrap();

    for frame in 0..3 {
        sim.advance_frame(frame, &mut |_: usize, _: &GridBuffer| -> Result<(), HeatError> {
            Ok(())
        })
        .unwrap();
    }

    assert!(sim.current().cells().iter().all(|&v| v == 0.0));
}
