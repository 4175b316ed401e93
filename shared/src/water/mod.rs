//! Interactive water surface shared between the CPU simulation and the shader.
//!
//! The same formulas are evaluated in two places:
//! - CPU (`surface`, `shading`): hit tests, the CPU surface path and tests
//! - GPU (`water.wgsl`): per-vertex displacement and per-fragment color
//!
//! ## Architecture
//!
//! ```text
//!   pointer events ──► InputController ──► RippleRegistry ─┐
//!                            │                             ▼
//!                            │               HeightFieldSynthesizer (+ NoiseField)
//!                            ▼                             │
//!                  SplashParticleSystem                    ▼
//!                            │                       ShadingModel
//!                            ▼                             │
//!                     particle visuals               water surface
//! ```
//!
//! Everything is owned by [`WaterSimulation`], which the client stores as a
//! single resource and steps once per frame.

pub mod clock;
pub mod config;
pub mod grid;
pub mod input;
pub mod noise;
pub mod ripples;
pub mod shading;
pub mod simulation;
pub mod splash;
pub mod surface;

pub use clock::SimulationClock;
pub use config::{ClockMode, WaterConfig};
pub use grid::{SurfaceGrid, SurfaceMeshData, SurfaceVertex};
pub use input::{InputOutcome, PointerEvent, PointerEventKind, PointerPhase, SurfaceRaycast};
pub use noise::NoiseField;
pub use ripples::{Ripple, RippleRegistry};
pub use shading::ShadingModel;
pub use simulation::WaterSimulation;
pub use splash::{ParticleId, SplashParticle, SplashParticleSystem};
pub use surface::{HeightFieldSynthesizer, SurfaceSample};
