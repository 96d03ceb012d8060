//! Host-side driver for an opaque rendering engine.
//!
//! Startup acquires a drawing surface, loads the engine module and constructs
//! one engine bound to the surface ([`bootstrap`]). The [`driver`] then
//! advances that engine once per display refresh and publishes the frame
//! delta ([`diagnostics`]). [`window`] hosts both on a winit window with a
//! wgpu surface ([`device`]).

pub mod bootstrap;
pub mod config;
pub mod device;
pub mod diagnostics;
pub mod driver;
pub mod engine;
pub mod error;
pub mod schedule;
pub mod surface;
pub mod time;
pub mod window;

pub mod logging;

pub use bootstrap::{BootstrapConfig, BootstrapStage, Bootstrapped, bootstrap};
pub use config::{DeltaReadout, HostConfig};
pub use driver::{DriverState, FrameDriver, FrameErrorPolicy, RunSummary, StepOutcome};
pub use engine::{ConstructionMode, Engine, EngineModule};
pub use error::{BootstrapError, EngineInitError, FrameAdvanceError, ModuleLoadError, SurfaceUnavailable};
