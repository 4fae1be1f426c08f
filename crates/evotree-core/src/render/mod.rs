pub mod dot_render;
pub mod outline_render;

pub use dot_render::render_dot;
pub use outline_render::render_outline;
