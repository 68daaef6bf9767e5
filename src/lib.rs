//! Bee Pollination Adventure, a 64×64 arcade game core.
//!
//! The library owns every rule of the game and nothing else: a host polls
//! input, calls [`compute::tick`] once per frame, and draws the returned
//! [`platform::Frame`].

pub mod beehive;
pub mod bee;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod flower;
pub mod level;
pub mod particles;
pub mod platform;
pub mod world;

pub use compute::{new_game, tick};
pub use config::GameConfig;
pub use entities::Game;
pub use error::GameError;
pub use platform::{Frame, Input};
