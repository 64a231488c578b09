use std::time::{Duration, Instant};

use heatgrid::{FrameTimer, HeatConfig, Simulation};
use image_util::PngBridge;
use log::info;

#[derive(Default)]
struct WallClock(Option<Instant>);

impl FrameTimer for WallClock {
    fn start(&mut self) {
        self.0 = Some(Instant::now());
    }

    fn stop(&mut self) -> Duration {
        self.0.take().map(|t| t.elapsed()).unwrap_or_default()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    const N_FRAME: usize = 64;

    let config = HeatConfig::default();
    info!("running on {} threads", rayon::current_num_threads());

    let mut sim = Simulation::reference(config)?.with_timer(WallClock::default());
    let mut bridge = PngBridge::new("heat");

    for f in 1..=N_FRAME {
        sim.advance_frame(f, &mut bridge)?;

        if let Some(avg) = sim.stats().average_millis() {
            eprint!("\r {} / {}  {:.1} ms/frame", f, N_FRAME, avg);
        }
    }
    eprintln!();

    let (last, stats) = sim.teardown();
    let peak = last.as_slice().iter().cloned().fold(f32::MIN, f32::max);
    info!(
        "wrote {} frames, last {:?}, peak temperature {}",
        stats.frames,
        bridge.written.last(),
        peak
    );

    Ok(())
}
