//! Deathfeed - Death Event Plugin Core
//!
//! Classifies player deaths on a game server, announces kills in chat,
//! streams a JSON record per player-vs-player kill to an analytics
//! collector, and answers `stats`/`podium` requests with reports fetched
//! from the collector over HTTP. The hosting server supplies the chat and
//! identity boundaries via the traits in [`engine`].

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod podium;
pub mod publisher;
pub mod stats;
pub mod webrequest;

pub use config::Config;
pub use dispatcher::{DeathFeed, PERM_PODIUM, PERM_STATS};
pub use engine::{Actor, Attacker, ChatSink, CommandSource, DeathOccurrence};
