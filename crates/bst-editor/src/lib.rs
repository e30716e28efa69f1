pub mod animation;
pub mod app;
pub mod error;
pub mod input;
pub mod parse;

pub use animation::{AnimationPhase, Animator};
pub use app::Visualizer;
pub use error::CommandError;
pub use input::KeyState;
