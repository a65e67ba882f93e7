use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use crate::pipeline::buffers::MeshBuffers;
use nalgebra::Vector3;

/// Owns the rasterizer and its target and runs indexed draws through them.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// `sample_count` is the per-axis supersampling factor (1 = off).
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height, sample_count),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.framebuffer.width as f32 / self.framebuffer.height.max(1) as f32
    }

    pub fn clear(&mut self, color: Vector3<f32>) {
        self.framebuffer.clear(color);
    }

    /// Draws every triangle of the index buffer with `shader`.
    pub fn draw_indexed<S: Shader>(&mut self, buffers: &MeshBuffers, shader: &S) {
        for triangle in buffers.indices().chunks_exact(3) {
            let corners = [triangle[0], triangle[1], triangle[2]]
                .map(|index| shader.vertex(&buffers.fetch(index)));
            self.rasterizer
                .draw_triangle(&self.framebuffer, shader, corners);
        }
    }
}
