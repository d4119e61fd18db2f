pub mod camera;
mod render;
pub mod renderer;
pub mod vertex;

pub use renderer::Renderer;
