/// Represents a single acquired frame.
///
/// Holding the surface texture prevents acquisition of subsequent frames;
/// hand it back through [`Gpu::submit`](super::Gpu::submit) promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
