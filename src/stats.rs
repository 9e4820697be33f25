//! Statistics tracking for the simulation.

use crate::bot::{Bot, BotId, ColorClass};
use crate::policy::PolicyKind;
use serde::{Deserialize, Serialize};

/// Statistics snapshot for a simulation tick
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current simulation time
    pub time: u64,
    /// Total bots in the registry, depleted included
    pub total: usize,
    /// Bots still carrying ink
    pub active: usize,
    /// Bots that have run dry
    pub depleted: usize,
    /// Mean remaining ink fraction across active bots
    pub ink_mean: f32,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats from the current registry state
    pub fn update(&mut self, bots: &[Bot]) {
        self.total = bots.len();
        self.active = bots.iter().filter(|b| b.alive).count();
        self.depleted = self.total - self.active;

        if self.active == 0 {
            self.ink_mean = 0.0;
        } else {
            let ink_sum: f32 = bots
                .iter()
                .filter(|b| b.alive)
                .map(|b| b.ink / b.max_ink)
                .sum();
            self.ink_mean = ink_sum / self.active as f32;
        }
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Bots:{:4} | Active:{:4} | Depleted:{:4} | Ink:{:.2}",
            self.time, self.total, self.active, self.depleted, self.ink_mean,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Get active bot count over time
    pub fn active_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.time, s.active)).collect()
    }

    /// Get mean ink fraction over time
    pub fn ink_series(&self) -> Vec<(u64, f32)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.ink_mean))
            .collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Per-bot status line for external consumers (CLI, embedding UIs)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BotStatus {
    pub id: BotId,
    pub alive: bool,
    pub ink_fraction: f32,
    pub color: ColorClass,
    pub policy: PolicyKind,
}

impl BotStatus {
    pub fn of(bot: &Bot) -> Self {
        Self {
            id: bot.id,
            alive: bot.alive,
            ink_fraction: if bot.max_ink > 0.0 {
                bot.ink / bot.max_ink
            } else {
                0.0
            },
            color: bot.color,
            policy: bot.policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::SpawnOverrides;
    use crate::config::{BotConfig, WorldConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bots(n: usize) -> Vec<Bot> {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        (0..n)
            .map(|i| {
                Bot::spawn(
                    i as BotId,
                    PolicyKind::Wander,
                    &BotConfig::default(),
                    &WorldConfig::default(),
                    &SpawnOverrides::default(),
                    &mut rng,
                )
            })
            .collect()
    }

    #[test]
    fn test_counts_active_and_depleted() {
        let mut registry = bots(4);
        registry[1].alive = false;
        registry[1].ink = 0.0;

        let mut stats = Stats::new();
        stats.update(&registry);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.depleted, 1);
    }

    #[test]
    fn test_ink_mean_over_active_only() {
        let mut registry = bots(2);
        registry[0].ink = registry[0].max_ink * 0.5;
        registry[1].alive = false;
        registry[1].ink = 0.0;

        let mut stats = Stats::new();
        stats.update(&registry);
        assert!((stats.ink_mean - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_registry() {
        let mut stats = Stats::new();
        stats.update(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.ink_mean, 0.0);
    }

    #[test]
    fn test_history_series() {
        let mut history = StatsHistory::new(10);
        for t in 0..3u64 {
            let mut s = Stats::new();
            s.time = t * 10;
            s.active = 5 - t as usize;
            history.record(s);
        }
        assert_eq!(
            history.active_series(),
            vec![(0, 5), (10, 4), (20, 3)]
        );
    }
}
