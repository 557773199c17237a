//! Grid geometry: card footprint and slot positions.
//!
//! The grid exactly spans the layout area, so it is centered in it:
//!
//! ```text
//! footprint.x = (width - (columns - 1) * spacing) / columns
//! footprint.z = (depth - (rows - 1) * spacing) / rows
//! slot(r, c).x = center.x - width / 2 + footprint.x / 2 + c * (footprint.x + spacing)
//! slot(r, c).z = center.z + depth / 2 - footprint.z / 2 - r * (footprint.z + spacing)
//! ```
//!
//! ```
//! use quantum_tiles::board::GridGeometry;
//! use quantum_tiles::core::{BoardConfig, LayoutConfig, Vec3};
//!
//! let layout = LayoutConfig::default()
//!     .with_area(Vec3::ZERO, 4.0, 4.0)
//!     .with_spacing(0.0);
//! let grid = GridGeometry::compute(&layout, BoardConfig::new(2, 2)).unwrap();
//!
//! assert_eq!(grid.position(0, 0), Vec3::new(-1.0, 0.0, 1.0));
//! assert_eq!(grid.position(1, 1), Vec3::new(1.0, 0.0, -1.0));
//! ```

use crate::core::config::{BoardConfig, LayoutConfig};
use crate::core::error::{GameError, Result};
use crate::core::vec3::Vec3;

/// Resolved placement for every slot of one grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    board: BoardConfig,
    footprint: Vec3,
    /// Center of slot (0, 0).
    origin: Vec3,
    spacing: f64,
    scale: Vec3,
}

impl GridGeometry {
    /// Fit `board` into the layout area.
    ///
    /// Fails if the spacing leaves no room for a card or the layout is not
    /// finite.
    pub fn compute(layout: &LayoutConfig, board: BoardConfig) -> Result<Self> {
        if board.rows == 0 || board.columns == 0 {
            return Err(GameError::InvalidLayout(format!("empty grid {}", board)));
        }
        if layout.spacing < 0.0 || !layout.spacing.is_finite() {
            return Err(GameError::InvalidLayout(format!(
                "spacing {} must be finite and non-negative",
                layout.spacing
            )));
        }

        let columns = f64::from(board.columns);
        let rows = f64::from(board.rows);
        let width = (layout.width - (columns - 1.0) * layout.spacing) / columns;
        let depth = (layout.depth - (rows - 1.0) * layout.spacing) / rows;
        if !(width > 0.0 && depth > 0.0) {
            return Err(GameError::InvalidLayout(format!(
                "{} grid does not fit a {}x{} area with spacing {}",
                board, layout.width, layout.depth, layout.spacing
            )));
        }

        let footprint = Vec3::new(width, layout.card_height, depth);
        let origin = Vec3::new(
            layout.center.x - layout.width / 2.0 + width / 2.0,
            layout.center.y,
            layout.center.z + layout.depth / 2.0 - depth / 2.0,
        );
        let scale = footprint.scaled(layout.scale_factor);
        if !origin.is_finite() || !scale.is_finite() {
            return Err(GameError::InvalidLayout("non-finite layout".to_string()));
        }

        Ok(Self {
            board,
            footprint,
            origin,
            spacing: layout.spacing,
            scale,
        })
    }

    #[must_use]
    pub fn board(&self) -> BoardConfig {
        self.board
    }

    /// Unscaled card footprint (width, height, depth).
    #[must_use]
    pub fn footprint(&self) -> Vec3 {
        self.footprint
    }

    /// Scale applied to every spawned card.
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Center of slot `(row, column)`.
    #[must_use]
    pub fn position(&self, row: u32, column: u32) -> Vec3 {
        Vec3::new(
            self.origin.x + f64::from(column) * (self.footprint.x + self.spacing),
            self.origin.y,
            self.origin.z - f64::from(row) * (self.footprint.z + self.spacing),
        )
    }

    /// Slot centers in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.board.rows)
            .flat_map(move |row| (0..self.board.columns).map(move |column| self.position(row, column)))
    }
}
