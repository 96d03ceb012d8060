//! Error taxonomy for bootstrap and frame driving.
//!
//! Startup failures are fatal and never retried. Frame failures are handed to
//! the driver's [`FrameErrorPolicy`](crate::driver::FrameErrorPolicy).

use std::error::Error as StdError;

use crate::bootstrap::BootstrapStage;

/// Boxed error used as the optional cause of engine-side failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The drawing surface or its rendering context could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceUnavailable {
    /// No surface is registered under the requested identifier.
    #[error("no drawing surface registered as `{id}`")]
    MissingSurface { id: String },

    /// The context type string is not one this host knows about.
    #[error("unknown context type `{context_type}`")]
    UnknownContextType { context_type: String },

    /// The surface exists but the host refused to create the context.
    #[error("surface `{id}` does not support a `{context_type}` context")]
    ContextUnsupported { id: String, context_type: String },
}

/// The engine module failed to load or initialize.
#[derive(Debug, thiserror::Error)]
#[error("engine module failed to load: {reason}")]
pub struct ModuleLoadError {
    reason: String,
    #[source]
    source: Option<BoxError>,
}

impl ModuleLoadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into(), source: None }
    }

    pub fn with_source(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self { reason: reason.into(), source: Some(source.into()) }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// The engine could not be constructed against an otherwise valid surface.
#[derive(Debug, thiserror::Error)]
#[error("engine construction failed: {reason}")]
pub struct EngineInitError {
    reason: String,
    #[source]
    source: Option<BoxError>,
}

impl EngineInitError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into(), source: None }
    }

    pub fn with_source(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self { reason: reason.into(), source: Some(source.into()) }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// The engine's per-frame advance failed.
#[derive(Debug, thiserror::Error)]
#[error("frame advance failed: {reason}")]
pub struct FrameAdvanceError {
    reason: String,
    #[source]
    source: Option<BoxError>,
}

impl FrameAdvanceError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into(), source: None }
    }

    pub fn with_source(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self { reason: reason.into(), source: Some(source.into()) }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A bootstrap stage failed; no engine instance was produced.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    SurfaceUnavailable(#[from] SurfaceUnavailable),

    #[error(transparent)]
    ModuleLoad(#[from] ModuleLoadError),

    #[error(transparent)]
    EngineInit(#[from] EngineInitError),
}

impl BootstrapError {
    /// Stage at which the bootstrap was aborted.
    pub fn stage(&self) -> BootstrapStage {
        match self {
            BootstrapError::SurfaceUnavailable(_) => BootstrapStage::AcquireSurface,
            BootstrapError::ModuleLoad(_) => BootstrapStage::LoadModule,
            BootstrapError::EngineInit(_) => BootstrapStage::ConstructEngine,
        }
    }
}
