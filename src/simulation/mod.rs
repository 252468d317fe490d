pub mod animation;
pub mod controller;
pub mod snapshot;
pub mod state;
pub mod turns;

pub use animation::{AnimationCoordinator, AnimationHandle, AnimationOutcome, AnimationRequest};
pub use controller::{Command, ControllerHandle, SimulationController};
pub use snapshot::{PlaybackStatus, SimStats, Snapshot};
pub use state::SimulationState;
pub use turns::TurnIndex;
