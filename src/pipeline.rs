pub mod passes;
pub mod renderer;
pub mod settings;
pub mod shaders;
pub mod vertex_stage;
