//! Growback and harvest logic for sugar and spice patches.
//!
//! Each [`ResourcePatch`] holds a current `amount` and an immutable
//! `capacity`. Growback runs once per step before any trader acts and adds
//! one unit, capped so that `amount` never exceeds `capacity`. A harvest
//! takes the whole amount and leaves the patch empty; it regrows from zero on
//! later steps.

use serde::Serialize;
use sugarscape_types::{PatchId, Position, ResourceKind};

use crate::error::WorldError;

/// Units added to a patch by one growback.
pub const GROWBACK_PER_STEP: f64 = 1.0;

/// A renewable resource on one grid cell.
///
/// Fields are private so that `0 <= amount <= capacity` holds for the whole
/// lifetime of the patch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcePatch {
    id: PatchId,
    kind: ResourceKind,
    position: Position,
    amount: f64,
    capacity: f64,
}

impl ResourcePatch {
    /// Create a patch that starts full.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidCapacity`] if `capacity` is negative or
    /// not finite.
    pub fn new(
        id: PatchId,
        kind: ResourceKind,
        position: Position,
        capacity: f64,
    ) -> Result<Self, WorldError> {
        Self::with_amount(id, kind, position, capacity, capacity)
    }

    /// Create a patch with an explicit starting amount.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidCapacity`] for a negative or non-finite
    /// capacity, and [`WorldError::InvalidAmount`] if `amount` is outside
    /// `[0, capacity]`.
    pub fn with_amount(
        id: PatchId,
        kind: ResourceKind,
        position: Position,
        amount: f64,
        capacity: f64,
    ) -> Result<Self, WorldError> {
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(WorldError::InvalidCapacity(capacity));
        }
        if !amount.is_finite() || amount < 0.0 || amount > capacity {
            return Err(WorldError::InvalidAmount { amount, capacity });
        }
        Ok(Self {
            id,
            kind,
            position,
            amount,
            capacity,
        })
    }

    /// Patch identifier.
    pub const fn id(&self) -> PatchId {
        self.id
    }

    /// Sugar or spice.
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The cell this patch sits on.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Units currently available.
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// Maximum units the patch can hold.
    pub const fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Apply one step of growback.
    ///
    /// Sets `amount = min(capacity, amount + 1)` and returns the units
    /// actually added (zero when the patch is already full).
    pub fn grow(&mut self) -> f64 {
        let before = self.amount;
        self.amount = (self.amount + GROWBACK_PER_STEP).min(self.capacity);
        self.amount - before
    }

    /// Take everything on the patch, returning the units removed.
    pub const fn harvest(&mut self) -> f64 {
        let taken = self.amount;
        self.amount = 0.0;
        taken
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_patch(amount: f64, capacity: f64) -> ResourcePatch {
        ResourcePatch::with_amount(
            PatchId::new(0),
            ResourceKind::Sugar,
            Position::new(0, 0),
            amount,
            capacity,
        )
        .unwrap()
    }

    #[test]
    fn new_patch_starts_full() {
        let patch = ResourcePatch::new(
            PatchId::new(1),
            ResourceKind::Spice,
            Position::new(3, 4),
            4.0,
        );
        let patch = patch.unwrap();
        assert!((patch.amount() - 4.0).abs() < f64::EPSILON);
        assert!((patch.capacity() - 4.0).abs() < f64::EPSILON);
        assert_eq!(patch.kind(), ResourceKind::Spice);
        assert_eq!(patch.position(), Position::new(3, 4));
    }

    #[test]
    fn grow_adds_one_unit() {
        // capacity 10, amount 3 -> 4
        let mut patch = make_patch(3.0, 10.0);
        let added = patch.grow();
        assert!((added - 1.0).abs() < f64::EPSILON);
        assert!((patch.amount() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn grow_reaches_capacity_and_stays() {
        let mut patch = make_patch(3.0, 10.0);
        for _ in 0..7 {
            patch.grow();
        }
        assert!((patch.amount() - 10.0).abs() < f64::EPSILON);

        for _ in 0..5 {
            let added = patch.grow();
            assert!(added.abs() < f64::EPSILON);
            assert!((patch.amount() - 10.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn grow_caps_fractional_headroom() {
        let mut patch = make_patch(2.5, 3.0);
        let added = patch.grow();
        assert!((added - 0.5).abs() < f64::EPSILON);
        assert!((patch.amount() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn harvest_empties_patch() {
        let mut patch = make_patch(3.0, 4.0);
        let taken = patch.harvest();
        assert!((taken - 3.0).abs() < f64::EPSILON);
        assert!(patch.amount().abs() < f64::EPSILON);

        // Regrows from zero afterward.
        patch.grow();
        assert!((patch.amount() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_negative_capacity() {
        let patch = ResourcePatch::new(
            PatchId::new(0),
            ResourceKind::Sugar,
            Position::new(0, 0),
            -1.0,
        );
        assert!(matches!(patch, Err(WorldError::InvalidCapacity(_))));
    }

    #[test]
    fn rejects_amount_above_capacity() {
        let patch = ResourcePatch::with_amount(
            PatchId::new(0),
            ResourceKind::Sugar,
            Position::new(0, 0),
            5.0,
            4.0,
        );
        assert!(matches!(patch, Err(WorldError::InvalidAmount { .. })));
    }
}
