use std::fs;
use std::path::PathBuf;

use cgmath::Vector3;
use heatgrid::d2::GridBuffer;
use heatgrid::{HeatError, RenderBridge};
use image::{Rgba, RgbaImage};
use ndarray::Array2;

fn hue_channel(m1: f32, m2: f32, hue: i32) -> u8 {
    let hue = if hue > 360 {
        hue - 360
    } else if hue < 0 {
        hue + 360
    } else {
        hue
    };

    let v = if hue < 60 {
        m1 + (m2 - m1) * hue as f32 / 60.0
    } else if hue < 180 {
        m2
    } else if hue < 240 {
        m1 + (m2 - m1) * (240 - hue) as f32 / 60.0
    } else {
        m1
    };

    (255.0 * v) as u8
}

/// Map a temperature to a fully saturated HSL colour with lightness `l`.
pub fn heat_color(l: f32) -> Rgba<u8> {
    let s = 1.0;
    let h = (180 + (360.0 * l) as i32) % 360;

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    let rgb = Vector3::new(h + 120, h, h - 120).map(|hue| hue_channel(m1, m2, hue));
    Rgba([rgb.x, rgb.y, rgb.z, 255])
}

/// Cells are indexed `[[y, x]]`.
pub fn heat_image(x: &Array2<f32>) -> RgbaImage {
    let (h, w) = x.dim();

    let mut img = RgbaImage::new(w as u32, h as u32);

    for ((j, i), &l) in x.indexed_iter() {
        img.put_pixel(i as u32, j as u32, heat_color(l));
    }

    img
}

pub fn save_heat(prefix: &str, index: usize, x: &Array2<f32>) -> anyhow::Result<()> {
    fs::create_dir_all("out")?;
    heat_image(x).save(format!("out/{}_{:06}.png", prefix, index))?;

    Ok(())
}

/// Writes every presented frame as a PNG under `out/`.
pub struct PngBridge {
    prefix: String,
    pub written: Vec<PathBuf>,
}

impl PngBridge {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            written: Vec::new(),
        }
    }
}

impl RenderBridge for PngBridge {
    fn present(&mut self, frame: usize, grid: &GridBuffer) -> Result<(), HeatError> {
        save_heat(&self.prefix, frame, grid.cells())
            .map_err(|e| HeatError::Render { frame, source: e.into() })?;

        self.written
            .push(PathBuf::from(format!("out/{}_{:06}.png", self.prefix, frame)));
        Ok(())
    }
}
