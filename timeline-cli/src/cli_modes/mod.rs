mod aggregate_mode;
mod render_mode;
mod use_color;

pub use aggregate_mode::aggregate_mode;
pub use render_mode::render_mode;
pub use use_color::use_color;
