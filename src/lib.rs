//! Player statistics for the OnThePixel.net Minecraft server.
//!
//! The crate decodes formatting-coded rank strings ([`decode`]), assembles
//! a player's statistics with derived rates ([`build_from`]), and drives
//! lookups against the player-data API ([`StatsLookupController`],
//! [`StatsClient`]).

pub use aggregate::{build_from, LookupOutcome};
pub use client::{ClientConfig, StatsClient, DEFAULT_BASE_URL};
pub use controller::{LookupError, LookupState, StatsLookupController};
pub use error::{Result, StatsError};
pub use model::*;
pub use rank_code::decode;
pub use source::{lookup_player, PlayerDataSource};

pub mod aggregate;
pub(crate) mod api;
mod client;
mod controller;
mod error;
pub mod format;
pub mod model;
pub mod rank_code;
mod source;
