//! Landscape loading: per-cell sugar and spice capacities.
//!
//! A landscape file is a plain-text numeric matrix. Each non-blank line is a
//! row (the `x` coordinate) and each whitespace-separated token a column
//! (the `y` coordinate). Text after `#` on a line is ignored.
//!
//! Only the sugar matrix is read. The spice matrix is the sugar matrix
//! reversed along the `y` axis, so `spice[x][y] = sugar[x][height - 1 - y]`.

use std::path::Path;

use sugarscape_types::{Position, ResourceKind};
use tracing::debug;

use crate::error::WorldError;

/// Sugar and spice capacity matrices of identical shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Landscape {
    width: u32,
    height: u32,
    /// Row-major sugar capacities, `x * height + y`.
    sugar: Vec<f64>,
    /// Row-major spice capacities, `x * height + y`.
    spice: Vec<f64>,
}

impl Landscape {
    /// Build a landscape from sugar rows, deriving spice by mirroring.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LandscapeEmpty`] for no rows or an empty first
    /// row, [`WorldError::LandscapeRagged`] if rows differ in length,
    /// [`WorldError::InvalidCapacity`] for negative or non-finite entries, and
    /// [`WorldError::InvalidDimensions`] if a dimension exceeds `u32`.
    pub fn from_sugar_rows(rows: &[Vec<f64>]) -> Result<Self, WorldError> {
        let Some(first) = rows.first() else {
            return Err(WorldError::LandscapeEmpty);
        };
        let columns = first.len();
        if columns == 0 {
            return Err(WorldError::LandscapeEmpty);
        }

        let mut sugar = Vec::with_capacity(rows.len().saturating_mul(columns));
        let mut spice = Vec::with_capacity(rows.len().saturating_mul(columns));
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(WorldError::LandscapeRagged {
                    row: row_index,
                    expected: columns,
                    found: row.len(),
                });
            }
            if let Some(&bad) = row.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(WorldError::InvalidCapacity(bad));
            }
            sugar.extend_from_slice(row);
            spice.extend(row.iter().rev().copied());
        }

        let invalid = || WorldError::InvalidDimensions {
            width: rows.len(),
            height: columns,
        };
        let width = u32::try_from(rows.len()).map_err(|_overflow| invalid())?;
        let height = u32::try_from(columns).map_err(|_overflow| invalid())?;

        Ok(Self {
            width,
            height,
            sugar,
            spice,
        })
    }

    /// Parse a landscape from text.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LandscapeParse`] for a token that is not a
    /// number, plus every error of [`Landscape::from_sugar_rows`].
    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let mut rows = Vec::new();
        for (line_index, raw_line) in text.lines().enumerate() {
            let line = raw_line.split('#').next().unwrap_or_default();
            let mut row = Vec::new();
            for (column_index, token) in line.split_whitespace().enumerate() {
                let value: f64 = token.parse().map_err(|_not_a_number| WorldError::LandscapeParse {
                    line: line_index.saturating_add(1),
                    column: column_index.saturating_add(1),
                    token: token.to_owned(),
                })?;
                row.push(value);
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        Self::from_sugar_rows(&rows)
    }

    /// Read and parse a landscape file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LandscapeIo`] if the file cannot be read, plus
    /// every error of [`Landscape::parse`].
    pub fn from_file(path: &Path) -> Result<Self, WorldError> {
        let text = std::fs::read_to_string(path).map_err(|source| WorldError::LandscapeIo {
            path: path.to_path_buf(),
            source,
        })?;
        let landscape = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            width = landscape.width,
            height = landscape.height,
            "Landscape loaded"
        );
        Ok(landscape)
    }

    /// Check that the landscape matches the configured grid size.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LandscapeShape`] on mismatch.
    pub fn ensure_shape(&self, width: u32, height: u32) -> Result<(), WorldError> {
        if self.width != width || self.height != height {
            return Err(WorldError::LandscapeShape {
                expected_width: width,
                expected_height: height,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Number of rows.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of columns.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Capacity of the given resource at a cell, or `None` off the grid.
    pub fn capacity(&self, kind: ResourceKind, position: Position) -> Option<f64> {
        if position.x >= self.width || position.y >= self.height {
            return None;
        }
        let index = usize::try_from(
            u64::from(position.x)
                .saturating_mul(u64::from(self.height))
                .saturating_add(u64::from(position.y)),
        )
        .ok()?;
        match kind {
            ResourceKind::Sugar => self.sugar.get(index).copied(),
            ResourceKind::Spice => self.spice.get(index).copied(),
        }
    }
}
