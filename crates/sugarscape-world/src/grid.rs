//! The bounded grid: resource patches, trader occupancy, and neighborhoods.
//!
//! The [`Grid`] is the spatial backbone of the simulation. It stores every
//! sugar and spice [`ResourcePatch`] keyed by cell, and a two-way index
//! between traders and the cells they stand on. It holds no trader state
//! beyond position; holdings and metabolism live in the trader registry of
//! the simulation state.
//!
//! The grid itself does not enforce one trader per cell beyond rejecting a
//! placement onto a cell already held by someone else. Callers check
//! [`Grid::is_occupied_by_trader`] before moving.

use std::collections::BTreeMap;

use sugarscape_types::{IdSequence, NeighborhoodKind, Position, ResourceKind, TraderId};

use crate::error::WorldError;
use crate::landscape::Landscape;
use crate::resource::ResourcePatch;

/// Everything present on a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellContents<'a> {
    /// The sugar patch on the cell, if any.
    pub sugar: Option<&'a ResourcePatch>,
    /// The spice patch on the cell, if any.
    pub spice: Option<&'a ResourcePatch>,
    /// The trader standing on the cell, if any.
    pub trader: Option<TraderId>,
}

impl CellContents<'_> {
    /// Whether nothing at all is on the cell.
    pub const fn is_empty(&self) -> bool {
        self.sugar.is_none() && self.spice.is_none() && self.trader.is_none()
    }
}

/// Resources taken from a cell by a harvest.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Harvest {
    /// Sugar removed.
    pub sugar: f64,
    /// Spice removed.
    pub spice: f64,
}

/// The simulation grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u32,
    height: u32,
    /// Sugar patches by cell.
    sugar: BTreeMap<Position, ResourcePatch>,
    /// Spice patches by cell.
    spice: BTreeMap<Position, ResourcePatch>,
    /// Cell -> trader standing on it.
    occupants: BTreeMap<Position, TraderId>,
    /// Trader -> cell it stands on.
    locations: BTreeMap<TraderId, Position>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions {
                width: width as usize,
                height: height as usize,
            });
        }
        Ok(Self {
            width,
            height,
            sugar: BTreeMap::new(),
            spice: BTreeMap::new(),
            occupants: BTreeMap::new(),
            locations: BTreeMap::new(),
        })
    }

    /// Build a grid from a landscape, creating a full patch wherever the
    /// capacity is positive.
    ///
    /// Cells are scanned row by row; on each cell the sugar patch (if any)
    /// takes the next id before the spice patch.
    ///
    /// # Errors
    ///
    /// Propagates [`WorldError`] from grid construction and patch creation.
    pub fn from_landscape(landscape: &Landscape, ids: &mut IdSequence) -> Result<Self, WorldError> {
        let mut grid = Self::new(landscape.width(), landscape.height())?;
        for x in 0..landscape.width() {
            for y in 0..landscape.height() {
                let position = Position::new(x, y);
                for kind in ResourceKind::ALL {
                    let capacity = landscape.capacity(kind, position).unwrap_or_default();
                    if capacity > 0.0 {
                        let patch = ResourcePatch::new(ids.next_patch(), kind, position, capacity)?;
                        grid.add_patch(patch)?;
                    }
                }
            }
        }
        Ok(grid)
    }

    // -------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------

    /// Number of rows.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of columns.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub const fn cell_count(&self) -> u64 {
        (self.width as u64).saturating_mul(self.height as u64)
    }

    /// Whether a position lies on the grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    fn check_bounds(&self, position: Position) -> Result<(), WorldError> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Cells within `radius` of `center`, clipped to the grid.
    ///
    /// Distance is Manhattan for [`NeighborhoodKind::VonNeumann`] and
    /// Chebyshev for [`NeighborhoodKind::Moore`]. The result is ordered by
    /// increasing distance, then row-major (ascending `x`, then `y`) within
    /// each ring. The center comes first when `include_center` is set.
    pub fn neighborhood(
        &self,
        center: Position,
        kind: NeighborhoodKind,
        include_center: bool,
        radius: u32,
    ) -> Vec<Position> {
        // No cell lies further away than this, whatever the metric.
        let reach = radius.min(self.width.saturating_add(self.height));
        let cx = i64::from(center.x);
        let cy = i64::from(center.y);

        let mut cells = Vec::new();
        let first_ring = u32::from(!include_center);
        for ring in first_ring..=reach {
            let d = i64::from(ring);
            for dx in d.saturating_neg()..=d {
                let x = cx.saturating_add(dx);
                match kind {
                    NeighborhoodKind::VonNeumann => {
                        let rest = d.saturating_sub(dx.saturating_abs());
                        self.push_clipped(&mut cells, x, cy.saturating_sub(rest));
                        if rest != 0 {
                            self.push_clipped(&mut cells, x, cy.saturating_add(rest));
                        }
                    }
                    NeighborhoodKind::Moore => {
                        if dx.saturating_abs() == d {
                            for dy in d.saturating_neg()..=d {
                                self.push_clipped(&mut cells, x, cy.saturating_add(dy));
                            }
                        } else {
                            self.push_clipped(&mut cells, x, cy.saturating_sub(d));
                            self.push_clipped(&mut cells, x, cy.saturating_add(d));
                        }
                    }
                }
            }
        }
        cells
    }

    fn push_clipped(&self, cells: &mut Vec<Position>, x: i64, y: i64) {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            let position = Position::new(x, y);
            if self.contains(position) {
                cells.push(position);
            }
        }
    }

    // -------------------------------------------------------------------
    // Patches
    // -------------------------------------------------------------------

    const fn patches_of(&self, kind: ResourceKind) -> &BTreeMap<Position, ResourcePatch> {
        match kind {
            ResourceKind::Sugar => &self.sugar,
            ResourceKind::Spice => &self.spice,
        }
    }

    const fn patches_of_mut(&mut self, kind: ResourceKind) -> &mut BTreeMap<Position, ResourcePatch> {
        match kind {
            ResourceKind::Sugar => &mut self.sugar,
            ResourceKind::Spice => &mut self.spice,
        }
    }

    /// Add a patch to the grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the patch lies off the grid, or
    /// [`WorldError::DuplicatePatch`] if a patch of the same kind already
    /// occupies the cell.
    pub fn add_patch(&mut self, patch: ResourcePatch) -> Result<(), WorldError> {
        let position = patch.position();
        let kind = patch.kind();
        self.check_bounds(position)?;
        let patches = self.patches_of_mut(kind);
        if patches.contains_key(&position) {
            return Err(WorldError::DuplicatePatch { kind, position });
        }
        patches.insert(position, patch);
        Ok(())
    }

    /// The patch of the given kind at a cell.
    pub fn patch(&self, kind: ResourceKind, position: Position) -> Option<&ResourcePatch> {
        self.patches_of(kind).get(&position)
    }

    /// Mutable access to the patch of the given kind at a cell.
    pub fn patch_mut(&mut self, kind: ResourceKind, position: Position) -> Option<&mut ResourcePatch> {
        self.patches_of_mut(kind).get_mut(&position)
    }

    /// Iterate over all patches of a kind in row-major order.
    pub fn patches(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourcePatch> {
        self.patches_of(kind).values()
    }

    /// Number of patches of a kind.
    pub fn patch_count(&self, kind: ResourceKind) -> usize {
        self.patches_of(kind).len()
    }

    /// Units of a resource available at a cell; zero when there is no patch.
    pub fn amount_at(&self, kind: ResourceKind, position: Position) -> f64 {
        self.patch(kind, position).map_or(0.0, ResourcePatch::amount)
    }

    /// Apply one step of growback to every patch of a kind.
    ///
    /// Returns the total units added.
    pub fn grow_all(&mut self, kind: ResourceKind) -> f64 {
        self.patches_of_mut(kind)
            .values_mut()
            .map(ResourcePatch::grow)
            .sum()
    }

    /// Take everything from the patches on a cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the cell is off the grid.
    pub fn harvest_at(&mut self, position: Position) -> Result<Harvest, WorldError> {
        self.check_bounds(position)?;
        let sugar = self
            .patch_mut(ResourceKind::Sugar, position)
            .map_or(0.0, ResourcePatch::harvest);
        let spice = self
            .patch_mut(ResourceKind::Spice, position)
            .map_or(0.0, ResourcePatch::harvest);
        Ok(Harvest { sugar, spice })
    }

    /// Current amounts of a resource as a `width x height` matrix.
    pub fn amount_matrix(&self, kind: ResourceKind) -> Vec<Vec<f64>> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| self.amount_at(kind, Position::new(x, y)))
                    .collect()
            })
            .collect()
    }

    // -------------------------------------------------------------------
    // Occupancy
    // -------------------------------------------------------------------

    /// Everything on a cell.
    pub fn contents(&self, position: Position) -> CellContents<'_> {
        CellContents {
            sugar: self.patch(ResourceKind::Sugar, position),
            spice: self.patch(ResourceKind::Spice, position),
            trader: self.trader_at(position),
        }
    }

    /// The trader standing on a cell.
    pub fn trader_at(&self, position: Position) -> Option<TraderId> {
        self.occupants.get(&position).copied()
    }

    /// The cell a trader stands on.
    pub fn position_of(&self, trader: TraderId) -> Option<Position> {
        self.locations.get(&trader).copied()
    }

    /// Number of traders on the grid.
    pub fn trader_count(&self) -> usize {
        self.locations.len()
    }

    /// Iterate over `(trader, cell)` pairs in trader-id order.
    pub fn trader_positions(&self) -> impl Iterator<Item = (TraderId, Position)> + '_ {
        self.locations.iter().map(|(id, pos)| (*id, *pos))
    }

    /// Whether a trader other than `excluding` stands on the cell.
    ///
    /// A trader never blocks its own cell, so staying put is always allowed.
    pub fn is_occupied_by_trader(&self, position: Position, excluding: Option<TraderId>) -> bool {
        self.trader_at(position)
            .is_some_and(|occupant| Some(occupant) != excluding)
    }

    /// Put a trader on a cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for a cell off the grid,
    /// [`WorldError::TraderAlreadyPlaced`] if the trader is on the grid
    /// already, or [`WorldError::CellOccupied`] if another trader holds the
    /// cell.
    pub fn place(&mut self, trader: TraderId, position: Position) -> Result<(), WorldError> {
        self.check_bounds(position)?;
        if let Some(current) = self.position_of(trader) {
            return Err(WorldError::TraderAlreadyPlaced {
                trader,
                position: current,
            });
        }
        if let Some(occupant) = self.trader_at(position) {
            return Err(WorldError::CellOccupied { position, occupant });
        }
        self.occupants.insert(position, trader);
        self.locations.insert(trader, position);
        Ok(())
    }

    /// Take a trader off the grid, returning the cell it stood on.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TraderNotPlaced`] if the trader is not on the
    /// grid.
    pub fn remove(&mut self, trader: TraderId) -> Result<Position, WorldError> {
        let position = self
            .locations
            .remove(&trader)
            .ok_or(WorldError::TraderNotPlaced(trader))?;
        self.occupants.remove(&position);
        Ok(position)
    }

    /// Move a trader to another cell, returning the cell it left.
    ///
    /// Moving onto the trader's own cell is a no-op. The grid is left
    /// unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TraderNotPlaced`], [`WorldError::OutOfBounds`],
    /// or [`WorldError::CellOccupied`].
    pub fn move_trader(&mut self, trader: TraderId, to: Position) -> Result<Position, WorldError> {
        let from = self
            .position_of(trader)
            .ok_or(WorldError::TraderNotPlaced(trader))?;
        if from == to {
            return Ok(from);
        }
        self.check_bounds(to)?;
        if let Some(occupant) = self.trader_at(to) {
            return Err(WorldError::CellOccupied {
                position: to,
                occupant,
            });
        }
        self.remove(trader)?;
        self.place(trader, to)?;
        Ok(from)
    }
}
