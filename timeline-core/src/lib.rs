pub mod aggregate;
pub mod config;
pub mod date_time;
pub mod event;
pub mod fences;
pub mod notes;
pub mod parse_block;
pub mod periods;
pub mod relative;
pub mod render;

pub use config::{Config, SortDirection};
pub use event::TimelineEvent;
pub use parse_block::{BlockError, parse_block};
