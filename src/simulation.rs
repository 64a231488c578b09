use std::time::Duration;

use log::{debug, info};

use crate::config::HeatConfig;
use crate::d2::{clamp_sources, diffuse_into, seed, DoubleBuffer, GridBuffer, SourceMask};
use crate::error::HeatError;

/// Receives the finished grid of every displayed frame.
pub trait RenderBridge {
    fn present(&mut self, frame: usize, grid: &GridBuffer) -> Result<(), HeatError>;
}

impl<F> RenderBridge for F
where
    F: FnMut(usize, &GridBuffer) -> Result<(), HeatError>,
{
    fn present(&mut self, frame: usize, grid: &GridBuffer) -> Result<(), HeatError> {
        self(frame, grid)
    }
}

/// Wall-clock source used only for reporting.
pub trait FrameTimer {
    fn start(&mut self);
    /// Time since the matching `start`.
    fn stop(&mut self) -> Duration;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Stepping,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: usize,
    pub total: Duration,
}

impl FrameStats {
    pub fn average_millis(&self) -> Option<f64> {
        if self.frames == 0 {
            None
        } else {
            Some(self.total.as_secs_f64() * 1000.0 / self.frames as f64)
        }
    }
}

/// Owns the double-buffered field and its sources, and advances them.
pub struct Simulation {
    config: HeatConfig,
    buffers: DoubleBuffer,
    mask: SourceMask,
    state: DriverState,
    stats: FrameStats,
    timer: Option<Box<dyn FrameTimer>>,
}

impl Simulation {
    pub fn new(config: HeatConfig, mask: SourceMask, initial: GridBuffer) -> Result<Self, HeatError> {
        config.validate()?;

        for (what, actual) in [("source mask", mask.dim()), ("initial grid", initial.dim())] {
            if actual != config.dim {
                return Err(HeatError::DimensionMismatch {
                    what,
                    expected: config.dim,
                    actual,
                });
            }
        }

        info!(
            "heat simulation {}x{}: speed {}, {} substeps per frame, {} pinned cells",
            config.dim,
            config.dim,
            config.speed,
            config.substeps_per_frame,
            mask.pinned_count()
        );

        Ok(Self {
            config,
            buffers: DoubleBuffer::new(initial),
            mask,
            state: DriverState::Idle,
            stats: FrameStats::default(),
            timer: None,
        })
    }

    /// Simulation seeded with the reference sources and starting field.
    pub fn reference(config: HeatConfig) -> Result<Self, HeatError> {
        config.validate()?;
        let mask = seed::reference_sources(&config).to_mask(config.dim);
        let initial = seed::reference_initial(&config).to_grid(config.dim);
        Self::new(config, mask, initial)
    }

    pub fn with_timer(mut self, timer: impl FrameTimer + 'static) -> Self {
        self.timer = Some(Box::new(timer));
        self
    }

    /// One substep: pin sources in current, diffuse current into next, swap.
    pub fn step(&mut self) {
        let parallel = self.config.parallel;

        clamp_sources(self.buffers.current_mut(), &self.mask, parallel);

        let (current, next) = self.buffers.split_mut();
        diffuse_into(current, next, self.config.speed, parallel);

        self.buffers.swap();
    }

    /// Run a frame's substeps, then hand the current grid to `bridge`.
    pub fn advance_frame<B>(&mut self, frame: usize, bridge: &mut B) -> Result<(), HeatError>
    where
        B: RenderBridge + ?Sized,
    {
        if self.state == DriverState::Idle {
            debug!("first frame requested, start stepping");
            self.state = DriverState::Stepping;
        }

        if let Some(timer) = self.timer.as_mut() {
            timer.start();
        }

        for _ in 0..self.config.substeps_per_frame {
            self.step();
        }

        bridge.present(frame, self.buffers.current())?;

        if let Some(timer) = self.timer.as_mut() {
            self.stats.total += timer.stop();
        }
        self.stats.frames += 1;

        match self.stats.average_millis() {
            Some(avg) if self.timer.is_some() => {
                debug!("frame {}: average time per frame {:.1} ms", frame, avg)
            }
            _ => debug!("frame {} presented", frame),
        }

        Ok(())
    }

    pub fn config(&self) -> &HeatConfig {
        &self.config
    }

    pub fn current(&self) -> &GridBuffer {
        self.buffers.current()
    }

    pub fn mask(&self) -> &SourceMask {
        &self.mask
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Release the next grid and the mask, handing back the final current
    /// grid and the frame statistics.
    pub fn teardown(self) -> (GridBuffer, FrameStats) {
        match self.stats.average_millis() {
            Some(avg) if self.timer.is_some() => info!(
                "released after {} frames, average time per frame {:.1} ms",
                self.stats.frames, avg
            ),
            _ => info!("released after {} frames", self.stats.frames),
        }

        (self.buffers.into_current(), self.stats)
    }
}
