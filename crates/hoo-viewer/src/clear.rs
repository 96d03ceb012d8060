//! Demo engine: clears the surface every frame with a slowly cycling color.

use std::f64::consts::TAU;

use hoo_host::device::{Gpu, GpuContext, GpuInit, SurfaceErrorAction};
use hoo_host::{Engine, EngineInitError, EngineModule, FrameAdvanceError, ModuleLoadError};

/// Demo engine settings.
#[derive(Debug, Clone)]
pub struct ClearSettings {
    /// Frames for one full trip around the color wheel.
    pub cycle_frames: u64,

    /// Fail every frame from this index on, to exercise the frame error policy.
    pub fail_after: Option<u64>,

    pub gpu: GpuInit,
}

impl Default for ClearSettings {
    fn default() -> Self {
        Self {
            cycle_frames: 600,
            fail_after: None,
            gpu: GpuInit::default(),
        }
    }
}

pub struct ClearModule {
    settings: ClearSettings,
    initialized: bool,
}

impl ClearModule {
    pub fn new(settings: ClearSettings) -> Self {
        Self {
            settings,
            initialized: false,
        }
    }
}

impl EngineModule for ClearModule {
    type Context = GpuContext;
    type Engine = ClearEngine;

    async fn initialize(&mut self) -> Result<(), ModuleLoadError> {
        if self.settings.cycle_frames == 0 {
            return Err(ModuleLoadError::new("cycle_frames must be at least 1"));
        }
        self.initialized = true;
        log::debug!("clear module ready ({} frame cycle)", self.settings.cycle_frames);
        Ok(())
    }

    async fn construct_async(&mut self, context: GpuContext) -> Result<ClearEngine, EngineInitError> {
        if !self.initialized {
            return Err(EngineInitError::new("module used before initialization"));
        }

        log::debug!("constructing clear engine on a {} context", context.kind());
        let gpu = Gpu::negotiate(context, self.settings.gpu.clone()).await?;

        Ok(ClearEngine {
            gpu,
            frame: 0,
            cycle_frames: self.settings.cycle_frames,
            fail_after: self.settings.fail_after,
        })
    }
}

pub struct ClearEngine {
    gpu: Gpu,
    frame: u64,
    cycle_frames: u64,
    fail_after: Option<u64>,
}

impl Engine for ClearEngine {
    fn advance_frame(&mut self) -> Result<(), FrameAdvanceError> {
        let index = self.frame;
        self.frame += 1;

        injected_failure(index, self.fail_after)?;

        // Minimized: nothing to present.
        if !self.gpu.sync_size() {
            return Ok(());
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let reason = err.to_string();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(FrameAdvanceError::new(reason)),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::debug!("skipping frame {index}: {reason}");
                        Ok(())
                    }
                };
            }
        };

        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hoo clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view:           &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(clear_color(index, self.cycle_frames)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes:         None,
                occlusion_query_set:      None,
                multiview_mask:           None,
            });
        }

        self.gpu.submit(frame);
        Ok(())
    }
}

/// Fails frame `index` once it reaches `fail_after`.
fn injected_failure(index: u64, fail_after: Option<u64>) -> Result<(), FrameAdvanceError> {
    match fail_after {
        Some(n) if index >= n => Err(FrameAdvanceError::new(format!("injected failure at frame {index}"))),
        _ => Ok(()),
    }
}

/// Color for frame `index`: three phase-shifted sine waves, dimmed.
fn clear_color(index: u64, cycle_frames: u64) -> wgpu::Color {
    let t = (index % cycle_frames.max(1)) as f64 / cycle_frames.max(1) as f64;
    let channel = |phase: f64| 0.1 + 0.3 * (0.5 + 0.5 * (TAU * (t + phase)).sin());

    wgpu::Color {
        r: channel(0.0),
        g: channel(1.0 / 3.0),
        b: channel(2.0 / 3.0),
        a: 1.0,
    }
}
