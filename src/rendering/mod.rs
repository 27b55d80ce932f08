pub mod canvas;
pub mod viewport;
