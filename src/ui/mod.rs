pub mod components;
pub mod format;
pub mod state;
pub mod style;
