//! heatgrid advances a 2D temperature field with an explicit four-neighbour
//! diffusion stencil, re-pinning constant heat sources before every substep.
//!
//! The numerical pieces live in [`d2`]; [`Simulation`] drives them frame by
//! frame and hands the result to a [`RenderBridge`].

pub mod config;
pub mod d2;
pub mod error;
pub mod simulation;

pub use config::HeatConfig;
pub use error::HeatError;
pub use simulation::{DriverState, FrameStats, FrameTimer, RenderBridge, Simulation};
