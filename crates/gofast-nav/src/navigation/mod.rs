mod controller;
mod types;

pub use controller::{ControllerState, EditorHost, JumpOutcome, NavigationController};
pub use types::{NavigationTarget, PendingJump, TextPosition, TextRange};
