pub mod formatting;
pub mod render;

pub use render::{render_error, render_facets, render_view};
