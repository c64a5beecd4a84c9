//! Terminal presentation: text rendering, themed prompts

pub mod form;
pub mod render;
pub mod theme;

pub use form::{ExampleOption, ExamplePicker};
