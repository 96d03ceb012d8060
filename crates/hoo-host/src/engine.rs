//! Boundary to the opaque rendering engine.
//!
//! The host consumes exactly two capabilities from an engine: module-level
//! initialization plus construction against a rendering context, and a
//! per-frame advance on the constructed instance. Everything else the engine
//! does is invisible here.

use std::str::FromStr;

use crate::error::{EngineInitError, FrameAdvanceError, ModuleLoadError};

/// A constructed engine instance.
pub trait Engine {
    /// Advances the engine by one frame.
    ///
    /// Returns once the frame's work has been handed off; the driver does not
    /// schedule the next frame until this call returns.
    fn advance_frame(&mut self) -> Result<(), FrameAdvanceError>;
}

/// Loader/factory for an [`Engine`].
#[allow(async_fn_in_trait)]
pub trait EngineModule {
    /// Rendering context the engine is constructed against.
    type Context;

    /// Instance produced by construction.
    type Engine: Engine;

    /// Prepares the module (loading payloads, registering backends, ...).
    async fn initialize(&mut self) -> Result<(), ModuleLoadError>;

    /// Constructs an engine bound to `context`.
    async fn construct_async(&mut self, context: Self::Context) -> Result<Self::Engine, EngineInitError>;

    /// Constructs an engine bound to `context`, blocking the caller.
    ///
    /// Defaults to driving [`construct_async`](Self::construct_async) to
    /// completion on the current thread.
    fn construct(&mut self, context: Self::Context) -> Result<Self::Engine, EngineInitError> {
        pollster::block_on(self.construct_async(context))
    }
}

/// Which construction entry point the bootstrap uses.
///
/// Exactly one path runs per bootstrap.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ConstructionMode {
    /// [`EngineModule::construct`].
    Sync,
    /// [`EngineModule::construct_async`].
    #[default]
    Async,
}

impl FromStr for ConstructionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sync" => Ok(ConstructionMode::Sync),
            "async" => Ok(ConstructionMode::Async),
            other => Err(format!("unknown construction mode `{other}` (expected `sync` or `async`)")),
        }
    }
}
