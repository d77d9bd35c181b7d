//! Lévy walk movement traces for agents constrained to road networks.
//!
//! A [`map::GraphStore`] loads a road network once per set of map sources and
//! hands out a shared [`map::RoadMap`]. A [`movement::LevyWalk`] places agents
//! on that map and produces [`movement::Path`]s whose lengths follow a
//! heavy-tailed distribution while keeping a persistent heading.

pub mod config;
pub mod core;
pub mod error;
pub mod map;
pub mod movement;

pub use config::LevyWalkSettings;
pub use error::{Error, Result};
