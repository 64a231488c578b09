use crate::error::HeatError;

/// Parameters of a heat simulation.
///
/// [`HeatConfig::default`] is the reference configuration: a 1024x1024 grid,
/// diffusion speed 0.25 and 90 substeps per displayed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatConfig {
    /// Cells per side of the square grid.
    pub dim: usize,
    /// Coefficient of the stencil's neighbour-minus-self term.
    /// Values above 0.25 are unstable, which is not checked.
    pub speed: f32,
    pub max_temp: f32,
    pub min_temp: f32,
    pub substeps_per_frame: usize,
    /// Run the per-cell maps on the rayon thread pool.
    pub parallel: bool,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            dim: 1024,
            speed: 0.25,
            max_temp: 1.0,
            min_temp: 0.0001,
            substeps_per_frame: 90,
            parallel: true,
        }
    }
}

impl HeatConfig {
    pub fn validate(&self) -> Result<(), HeatError> {
        if self.dim == 0 {
            return Err(HeatError::ZeroDimension);
        }

        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(HeatError::InvalidSpeed(self.speed));
        }

        if !self.min_temp.is_finite() || !self.max_temp.is_finite() || self.min_temp > self.max_temp
        {
            return Err(HeatError::InvalidTemperatureRange {
                min: self.min_temp,
                max: self.max_temp,
            });
        }

        // seed temperatures are painted into the source mask
        for (which, t) in [
            ("min", self.min_temp),
            ("max", self.max_temp),
            ("mid", self.mid_temp()),
        ] {
            if t == 0.0 {
                return Err(HeatError::InertTemperature { which });
            }
        }

        if self.substeps_per_frame == 0 {
            return Err(HeatError::ZeroSubsteps);
        }

        Ok(())
    }

    /// Midpoint of the seed temperature range.
    pub fn mid_temp(&self) -> f32 {
        (self.max_temp + self.min_temp) / 2.0
    }
}
