pub mod overlay;
pub mod paint;
pub mod theme;

pub use overlay::{StatKind, StatLine, TextAnchor, stat_lines};
pub use theme::{Rgba, Theme};
