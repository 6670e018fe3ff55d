//! Rubik's Cube Engine Library
//!
//! Provides the logical cube (layer turns, move queue, solved detection),
//! gesture interpretation and the session glue used by the 3D viewer. Nothing
//! here touches a renderer: the viewer reads [`cube::RubiksCube::layout`] each
//! frame and feeds input back in as [`controls::Command`]s.

pub mod animation;
pub mod config;
pub mod controls;
pub mod cube;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod moves;
pub mod pieces;
pub mod session;
pub mod timer;

pub use config::Config;
pub use cube::{CubeEvent, RubiksCube};
pub use error::{Error, Result};
pub use moves::{Direction, Face, Move};
pub use session::Session;
