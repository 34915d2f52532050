//! The chef's plate.
//!
//! Rice can go down at any time. Fish must be chosen before garnish or sauce; a topping
//! placed on a plate without fish is refused and the plate is left as it was.

use crate::model::{Ingredient, Order};
use thiserror::Error;

/// Whether a placement altered the plate. Only changes are worth broadcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Changed,
    Unchanged,
}

impl Placement {
    pub fn is_changed(self) -> bool {
        self == Placement::Changed
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("No {ingredient} at index {index}")]
    OutOfCatalogue { ingredient: Ingredient, index: u8 },

    #[error("Cannot place {0} before fish")]
    NoFish(Ingredient),
}

/// One step of dish assembly, as issued from the chef's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStep {
    Rice,
    Fish(u8),
    Garnish(u8),
    Sauce(u8),
}

/// Holds the in-progress plate and enforces placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBuilder {
    plate: Order,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes building from an existing plate.
    pub fn from_order(plate: Order) -> Self {
        Self { plate }
    }

    pub fn plate(&self) -> &Order {
        &self.plate
    }

    pub fn apply(&mut self, step: PlacementStep) -> Result<Placement, PlacementError> {
        match step {
            PlacementStep::Rice => Ok(self.place_rice()),
            PlacementStep::Fish(index) => self.place_fish(index),
            PlacementStep::Garnish(index) => self.place_garnish(index),
            PlacementStep::Sauce(index) => self.place_sauce(index),
        }
    }

    pub fn place_rice(&mut self) -> Placement {
        Self::set(&mut self.plate.rice, true)
    }

    pub fn place_fish(&mut self, index: u8) -> Result<Placement, PlacementError> {
        check(Ingredient::Fish, index)?;
        Ok(Self::set(&mut self.plate.fish, Some(index)))
    }

    pub fn place_garnish(&mut self, index: u8) -> Result<Placement, PlacementError> {
        self.require_fish(Ingredient::Garnish)?;
        check(Ingredient::Garnish, index)?;
        Ok(Self::set(&mut self.plate.garnish, Some(index)))
    }

    pub fn place_sauce(&mut self, index: u8) -> Result<Placement, PlacementError> {
        self.require_fish(Ingredient::Sauce)?;
        check(Ingredient::Sauce, index)?;
        Ok(Self::set(&mut self.plate.sauce, Some(index)))
    }

    pub fn clear(&mut self) -> Placement {
        Self::set(&mut self.plate, Order::empty())
    }

    fn require_fish(&self, topping: Ingredient) -> Result<(), PlacementError> {
        if self.plate.fish.is_none() {
            return Err(PlacementError::NoFish(topping));
        }
        Ok(())
    }

    fn set<V: PartialEq>(slot: &mut V, value: V) -> Placement {
        if *slot == value {
            Placement::Unchanged
        } else {
            *slot = value;
            Placement::Changed
        }
    }
}

fn check(ingredient: Ingredient, index: u8) -> Result<(), PlacementError> {
    if ingredient.contains(index) {
        Ok(())
    } else {
        Err(PlacementError::OutOfCatalogue { ingredient, index })
    }
}
