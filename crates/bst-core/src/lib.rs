pub mod camera;
pub mod layout;
pub mod model;
pub mod settings;
pub mod trace;
pub mod tree;

pub use camera::{Camera, DirectionalKeys, WorldBounds};
pub use layout::compute_draw_state;
pub use model::*;
pub use settings::Settings;
pub use trace::Trace;
pub use tree::{NodeInfo, Tree};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
