//! Game configuration types.
//!
//! Hosts configure the core at startup by providing:
//! - `BoardConfig`: Grid dimensions for one deal
//! - `LayoutConfig`: The area the grid is laid out in
//! - `EngineConfig`: Resolution delays, scoring and auto-save policy
//! - `GameConfig`: Combines all configuration plus dimension bounds
//!
//! All configuration is plain data with builder helpers; nothing here
//! touches game state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use super::vec3::Vec3;

/// Grid dimensions for a deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: u32,
    pub columns: u32,
}

impl BoardConfig {
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Total number of slots on the grid.
    #[must_use]
    pub const fn slot_count(self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Number of pairs dealt onto the grid.
    #[must_use]
    pub const fn pair_count(self) -> usize {
        self.slot_count() / 2
    }

    /// Check the grid can hold a fully-paired deck.
    ///
    /// Odd slot totals are rejected rather than leaving one slot empty.
    pub fn validate(self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::InvalidPairCount);
        }
        if self.slot_count() % 2 != 0 {
            return Err(GameError::OddSlotCount {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for BoardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// The rectangular area a grid is laid out in.
///
/// The board lies in the X/Z plane: `width` runs along X, `depth` along Z,
/// and row 0 sits at the far (+Z) edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Center of the bounding area.
    pub center: Vec3,

    /// Extent along X.
    pub width: f64,

    /// Extent along Z.
    pub depth: f64,

    /// Gap between neighbouring cards.
    pub spacing: f64,

    /// Spawned card scale relative to its footprint.
    pub scale_factor: f64,

    /// Footprint height (Y extent) before scaling.
    pub card_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            width: 10.0,
            depth: 10.0,
            spacing: 0.1,
            scale_factor: 0.1,
            card_height: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Set the bounding area.
    #[must_use]
    pub fn with_area(mut self, center: Vec3, width: f64, depth: f64) -> Self {
        self.center = center;
        self.width = width;
        self.depth = depth;
        self
    }

    /// Set the inter-card spacing.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the card scale factor.
    #[must_use]
    pub fn with_scale_factor(mut self, factor: f64) -> Self {
        self.scale_factor = factor;
        self
    }
}

/// Match engine timing and scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pause between the second reveal and evaluation (default: 3s).
    pub memorize_delay: Duration,

    /// Pause after evaluation before reveals are accepted again (default: 2s).
    pub reenable_delay: Duration,

    /// Request a save each time a resolved pair re-enables input.
    pub auto_save: bool,

    /// Points per combo step; the k-th match of a streak scores `k * points_per_combo`.
    pub points_per_combo: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memorize_delay: Duration::from_secs(3),
            reenable_delay: Duration::from_secs(2),
            auto_save: false,
            points_per_combo: 10,
        }
    }
}

impl EngineConfig {
    /// Set both resolution delays.
    #[must_use]
    pub fn with_delays(mut self, memorize: Duration, reenable: Duration) -> Self {
        self.memorize_delay = memorize;
        self.reenable_delay = reenable;
        self
    }

    /// Enable or disable auto-save.
    #[must_use]
    pub fn with_auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub engine: EngineConfig,

    pub layout: LayoutConfig,

    /// Smallest accepted row or column count (default: 2).
    pub min_dimension: u32,

    /// Largest accepted row or column count (default: 32).
    pub max_dimension: u32,

    /// Fixed shuffle seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            layout: LayoutConfig::default(),
            min_dimension: 2,
            max_dimension: 32,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_dimension_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_dimension = min;
        self.max_dimension = max;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check a board against the dimension bounds and pairing rule.
    pub fn check_board(&self, board: BoardConfig) -> Result<()> {
        for value in [board.rows, board.columns] {
            if value < self.min_dimension || value > self.max_dimension {
                return Err(GameError::DimensionOutOfRange {
                    value,
                    min: self.min_dimension,
                    max: self.max_dimension,
                });
            }
        }
        board.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_counts() {
        let board = BoardConfig::new(4, 6);
        assert_eq!(board.slot_count(), 24);
        assert_eq!(board.pair_count(), 12);
        assert_eq!(format!("{}", board), "4x6");
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_odd_board_rejected() {
        let err = BoardConfig::new(3, 3).validate().unwrap_err();
        assert!(matches!(err, GameError::OddSlotCount { rows: 3, columns: 3 }));
    }

    #[test]
    fn test_zero_board_rejected() {
        assert!(matches!(
            BoardConfig::new(0, 4).validate(),
            Err(GameError::InvalidPairCount)
        ));
    }

    #[test]
    fn test_dimension_bounds() {
        let config = GameConfig::default();
        assert!(config.check_board(BoardConfig::new(2, 2)).is_ok());
        assert!(config.check_board(BoardConfig::new(32, 32)).is_ok());
        assert!(matches!(
            config.check_board(BoardConfig::new(1, 2)),
            Err(GameError::DimensionOutOfRange { value: 1, min: 2, max: 32 })
        ));
        assert!(matches!(
            config.check_board(BoardConfig::new(2, 33)),
            Err(GameError::DimensionOutOfRange { value: 33, .. })
        ));

        let relaxed = GameConfig::default().with_dimension_bounds(1, 4);
        assert!(relaxed.check_board(BoardConfig::new(1, 2)).is_ok());
    }

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.memorize_delay, Duration::from_secs(3));
        assert_eq!(config.reenable_delay, Duration::from_secs(2));
        assert!(!config.auto_save);
        assert_eq!(config.points_per_combo, 10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_seed(9)
            .with_engine(
                EngineConfig::default()
                    .with_delays(Duration::from_millis(10), Duration::from_millis(20))
                    .with_auto_save(true),
            )
            .with_layout(LayoutConfig::default().with_spacing(0.5));

        assert_eq!(config.seed, Some(9));
        assert!(config.engine.auto_save);
        assert_eq!(config.engine.reenable_delay, Duration::from_millis(20));
        assert_eq!(config.layout.spacing, 0.5);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
