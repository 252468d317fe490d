//! # Ant Farm
//!
//! Replays a recorded ant farm solution turn by turn.
//!
//! The library parses the ant farm text format into a graph of rooms and
//! tunnels plus the recorded moves, then drives an animated replay through a
//! playback controller. Drawing is left to a [`render::Renderer`].

pub mod ant;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod role;
pub mod simulation;
pub mod world;

pub use ant::{AntId, Move};
pub use cli::Args;
pub use config::SimulationConfig;
pub use error::{ParseError, Result, SimulationError, ValidationError};
pub use render::{Renderer, SceneLayout};
pub use role::RoomRole;
pub use simulation::{ControllerHandle, PlaybackStatus, SimulationController, Snapshot};
pub use world::ParsedGraph;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Args, ControllerHandle, Move, ParseError, ParsedGraph, PlaybackStatus, Renderer, Result,
        RoomRole, SceneLayout, SimulationConfig, SimulationController, SimulationError, Snapshot,
    };
}
