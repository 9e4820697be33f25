//! Configuration system for the inkbots simulation.
//!
//! Supports YAML configuration files with sensible defaults. All distances
//! are in world units, angles in degrees where humans edit them.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub bots: BotConfig,
    pub sensing: SensingConfig,
    #[serde(default)]
    pub pair: PairConfig,
    #[serde(default)]
    pub mill: MillConfig,
    pub logging: LoggingConfig,
}

/// World bounds and the shared edge-avoidance cone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World width in world units
    pub width: f32,
    /// World height in world units
    pub height: f32,
    /// Distance from a wall at which repulsion starts
    pub edge_range: f32,
    /// Half-angle of the avoidance cone, for overlay renderers
    pub edge_half_angle_deg: f32,
}

/// Per-spawn defaults; spawn overrides replace individual fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Travel speed in world units per tick
    pub speed: f32,
    /// Ink budget: total distance a bot can travel
    pub ink: f32,
    /// Trail stroke width in world units
    pub line_width: f32,
    /// Noise time step per tick (wander phase advance)
    pub wiggle: f32,
    /// Maximum wander turn per tick, degrees
    pub max_turn_deg: f32,
}

/// Trail sensor sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensingConfig {
    /// Pixels between grid samples when scanning the trail surface
    pub scan_step: u32,
}

/// Mutual-attraction ("pair") policy parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    /// Trail search radius in world units
    pub search_range: f32,
    /// Half-angle of the search cone, degrees
    pub search_half_deg: f32,
    /// Steering strength toward a detected mate or trail
    pub attract: f32,
    /// Direct-follow radius once the mate itself is nearby
    pub follow_range: f32,
    /// Weave amplitude as a fraction of the bot's max turn
    pub weave_amp: f32,
    /// Weave phase advance per tick
    pub weave_freq: f64,
}

/// Collective-mill policy parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MillConfig {
    /// Number of bots spawned per group
    pub count: usize,
    /// Trail search radius in world units
    pub search_range: f32,
    /// Half-angle of the search cone, degrees
    pub search_half_deg: f32,
    /// Pull toward own-color trail
    pub follow_strength: f32,
    /// Radius for following a nearby bot directly
    pub nearby_range: f32,
    /// Pull toward the nearest bot ahead
    pub nearby_strength: f32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Ticks between stats snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            bots: BotConfig::default(),
            sensing: SensingConfig::default(),
            pair: PairConfig::default(),
            mill: MillConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 66.0,
            height: 37.0,
            edge_range: 1.5,
            edge_half_angle_deg: 15.0,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            speed: 0.04,
            ink: 500.0,
            line_width: 0.15,
            wiggle: 0.02,
            max_turn_deg: 10.0,
        }
    }
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self { scan_step: 3 }
    }
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            search_range: 8.0,
            search_half_deg: 70.0,
            attract: 0.8,
            follow_range: 6.0,
            weave_amp: 0.35,
            weave_freq: 0.05,
        }
    }
}

impl Default for MillConfig {
    fn default() -> Self {
        Self {
            count: 15,
            search_range: 4.0,
            search_half_deg: 60.0,
            follow_strength: 0.07,
            nearby_range: 3.0,
            nearby_strength: 0.1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 60,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return Err("world dimensions must be positive".to_string());
        }
        if self.world.edge_range <= 0.0 {
            return Err("edge_range must be positive".to_string());
        }
        if self.sensing.scan_step == 0 {
            return Err("scan_step must be at least 1".to_string());
        }
        if self.mill.count == 0 {
            return Err("mill.count must be at least 1".to_string());
        }
        if self.bots.ink < 0.0 {
            return Err("ink budget cannot be negative".to_string());
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.world.width, loaded.world.width);
        assert_eq!(config.bots.speed, loaded.bots.speed);
        assert_eq!(config.mill.count, loaded.mill.count);
    }

    #[test]
    fn test_rejects_zero_scan_step() {
        let mut config = Config::default();
        config.sensing.scan_step = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_stats_interval() {
        let mut config = Config::default();
        config.logging.stats_interval = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_world() {
        let mut config = Config::default();
        config.world.width = 0.0;
        assert!(config.validate().is_err());
    }
}
