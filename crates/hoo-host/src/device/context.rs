use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::surface::ContextKind;

/// Rendering context handed to an engine at construction.
///
/// Holds the wgpu instance and a surface bound to the window. Adapter and
/// device negotiation is left to the engine.
pub struct GpuContext {
    /// wgpu instance restricted to the backends of `kind`.
    instance: wgpu::Instance,

    /// Surface bound to the window.
    ///
    /// The window is shared through `Arc`, so the surface is `'static`.
    surface: wgpu::Surface<'static>,

    /// Window backing the surface.
    window: Arc<Window>,

    kind: ContextKind,
}

impl GpuContext {
    /// Creates an instance with the backends of `kind` and a surface for `window`.
    ///
    /// Returns `None` when the host cannot create a surface of that kind.
    pub fn new(window: Arc<Window>, kind: ContextKind) -> Option<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: backends_for(kind),
            ..Default::default()
        });

        let surface = match instance.create_surface(window.clone()) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("failed to create {kind} surface: {e}");
                return None;
            }
        };

        Some(Self {
            instance,
            surface,
            window,
            kind,
        })
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    pub fn surface(&self) -> &wgpu::Surface<'static> {
        &self.surface
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Splits the context into its parts, for engines that keep them separately.
    pub fn into_parts(self) -> (wgpu::Instance, wgpu::Surface<'static>, Arc<Window>) {
        (self.instance, self.surface, self.window)
    }
}

pub(crate) fn backends_for(kind: ContextKind) -> wgpu::Backends {
    match kind {
        ContextKind::WebGpu => wgpu::Backends::PRIMARY,
        ContextKind::WebGl2 => wgpu::Backends::GL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_kinds_select_disjoint_backends() {
        let gpu = backends_for(ContextKind::WebGpu);
        let gl = backends_for(ContextKind::WebGl2);
        assert!(gpu.contains(wgpu::Backends::VULKAN));
        assert!(!gpu.contains(wgpu::Backends::GL));
        assert_eq!(gl, wgpu::Backends::GL);
    }
}
