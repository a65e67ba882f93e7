pub mod buffers;
pub mod passes;
pub mod renderer;
pub mod shaders;
pub mod uniforms;
