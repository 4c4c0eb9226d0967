pub mod renderer;
pub mod span;
pub mod style;
