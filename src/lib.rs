//! # INKBOTS
//!
//! Autonomous drawing bots with render-then-sense steering.
//!
//! ## Features
//!
//! - **Emergent**: bots read back their own rendered trails, so the picture
//!   is the only shared memory
//! - **Pluggable**: steering policies (wander, pair, mill) behind a trait
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inkbots::bot::SpawnOverrides;
//! use inkbots::policy::PolicyKind;
//! use inkbots::{Config, World};
//!
//! // Create world with default config at 12 px per world unit
//! let config = Config::default();
//! let mut world = World::new(config, 12.0);
//!
//! // Spawn a red/teal couple and run until the ink runs out
//! world.spawn(PolicyKind::Pair, &SpawnOverrides::default());
//! world.run(20_000);
//!
//! println!("Active bots: {}", world.active());
//! println!("{}", world.stats.summary());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use inkbots::Config;
//!
//! let mut config = Config::default();
//! config.bots.ink = 250.0;
//! config.mill.count = 30;
//! ```

pub mod bot;
pub mod config;
pub mod noise;
pub mod policy;
pub mod sensing;
pub mod stats;
pub mod steering;
pub mod surface;
pub mod world;

// Re-export main types
pub use bot::Bot;
pub use config::Config;
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
