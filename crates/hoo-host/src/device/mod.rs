//! wgpu context acquisition and device helpers.
//!
//! This module is responsible for:
//! - creating the wgpu Instance and a Surface for a window (`GpuContext`)
//! - negotiating Adapter/Device/Queue against that surface (`Gpu`)
//! - acquiring frames and classifying surface errors

mod context;
mod frame;
mod gpu;
mod init;
mod surface;

pub use context::GpuContext;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
