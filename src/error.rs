use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeatError {
    #[error("grid dimension must be non-zero")]
    ZeroDimension,
    #[error("diffusion speed {0} must be finite and non-negative")]
    InvalidSpeed(f32),
    #[error("temperature bounds must be finite with min {min} <= max {max}")]
    InvalidTemperatureRange { min: f32, max: f32 },
    #[error("{which} temperature must be non-zero, zero marks an inert mask cell")]
    InertTemperature { which: &'static str },
    #[error("substeps per frame must be non-zero")]
    ZeroSubsteps,
    #[error("{what} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("buffer of {actual} cells cannot hold a {dim}x{dim} grid")]
    BufferLength { dim: usize, actual: usize },
    #[error("failed to present frame {frame}")]
    Render {
        frame: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
