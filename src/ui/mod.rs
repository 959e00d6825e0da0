pub mod labels;
pub mod render;

pub use render::render_session;
