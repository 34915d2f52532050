//! The sushi order: what is on a plate, or what a ticket asks for.

use crate::model::catalog::{Ingredient, NO_RICE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A dish described by catalogue indexes.
///
/// `fish` is `None` until a fish has been chosen; on the wire that is the sentinel `-1`.
/// `garnish` and `sauce` are independent of each other and of `rice`/`fish`, and are
/// omitted from the wire form when absent.
///
/// Equality is field-wise with optional-field semantics, which is exactly the pass/fail
/// predicate used when judging a dish (see [`crate::kitchen::matcher`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Order {
    pub rice: bool,
    #[serde(default, with = "fish_slot")]
    pub fish: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garnish: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sauce: Option<u8>,
}

/// Errors raised when an order refers outside the catalogue.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("{kind} index {index} is outside the catalogue")]
    OutOfCatalogue { kind: Ingredient, index: u8 },
}

impl Order {
    /// An empty plate: no rice, no fish, nothing on top.
    pub const fn empty() -> Self {
        Self {
            rice: false,
            fish: None,
            garnish: None,
            sauce: None,
        }
    }

    /// A plate with the given base and no toppings.
    pub const fn new(rice: bool, fish: u8) -> Self {
        Self {
            rice,
            fish: Some(fish),
            garnish: None,
            sauce: None,
        }
    }

    pub const fn with_garnish(mut self, garnish: u8) -> Self {
        self.garnish = Some(garnish);
        self
    }

    pub const fn with_sauce(mut self, sauce: u8) -> Self {
        self.sauce = Some(sauce);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Checks that every present index lies inside its catalogue.
    pub fn validate(&self) -> Result<(), OrderError> {
        let slots = [
            (Ingredient::Fish, self.fish),
            (Ingredient::Garnish, self.garnish),
            (Ingredient::Sauce, self.sauce),
        ];
        for (kind, slot) in slots {
            if let Some(index) = slot {
                if !kind.contains(index) {
                    return Err(OrderError::OutOfCatalogue { kind, index });
                }
            }
        }
        Ok(())
    }

    /// Placed ingredients from the bottom of the plate up: rice, fish, sauce, garnish.
    pub fn layers(&self) -> Vec<(Ingredient, u8)> {
        let mut layers = Vec::with_capacity(4);
        if self.rice {
            layers.push((Ingredient::Rice, 0));
        }
        if let Some(fish) = self.fish {
            layers.push((Ingredient::Fish, fish));
        }
        if let Some(sauce) = self.sauce {
            layers.push((Ingredient::Sauce, sauce));
        }
        if let Some(garnish) = self.garnish {
            layers.push((Ingredient::Garnish, garnish));
        }
        layers
    }

    /// Human readable name, e.g. "Salmon Nigiri with Wasabi and Soy Sauce".
    pub fn dish_name(&self) -> String {
        let style = if self.rice {
            Ingredient::Rice.name(0).unwrap_or("Nigiri")
        } else {
            NO_RICE
        };
        let base = match self.fish {
            Some(fish) => format!("{} {}", name_or_unknown(Ingredient::Fish, fish), style),
            None if self.rice => format!("Plain {}", style),
            None => "Empty plate".to_string(),
        };

        let extras: Vec<&str> = [
            self.garnish.map(|g| name_or_unknown(Ingredient::Garnish, g)),
            self.sauce.map(|s| name_or_unknown(Ingredient::Sauce, s)),
        ]
        .into_iter()
        .flatten()
        .collect();

        if extras.is_empty() {
            base
        } else {
            format!("{} with {}", base, extras.join(" and "))
        }
    }

    /// A random, always valid order: any fish, rice 80% of the time, garnish and sauce
    /// 70% of the time each.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let fish = pick(rng, Ingredient::Fish);
        let garnish = rng.gen_bool(0.7).then(|| pick(rng, Ingredient::Garnish));
        let sauce = rng.gen_bool(0.7).then(|| pick(rng, Ingredient::Sauce));
        Self {
            rice: rng.gen_bool(0.8),
            fish: Some(fish),
            garnish,
            sauce,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dish_name())
    }
}

fn name_or_unknown(kind: Ingredient, index: u8) -> &'static str {
    kind.name(index).unwrap_or("Unknown")
}

fn pick<R: Rng + ?Sized>(rng: &mut R, kind: Ingredient) -> u8 {
    // Catalogues are tiny, the index always fits.
    rng.gen_range(0..kind.len()) as u8
}

/// Wire form of the fish slot: a catalogue index, or `-1` for "no fish yet".
mod fish_slot {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(fish: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        match fish {
            Some(index) => serializer.serialize_i16(i16::from(*index)),
            None => serializer.serialize_i16(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw == -1 {
            return Ok(None);
        }
        u8::try_from(raw)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("fish must be -1 or a catalogue index, got {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_wire_sentinel_for_missing_fish() {
        let wire = serde_json::to_value(Order::empty()).unwrap();
        assert_eq!(wire, json!({ "rice": false, "fish": -1 }));

        let decoded: Order = serde_json::from_value(json!({ "rice": true, "fish": -1 })).unwrap();
        assert_eq!(decoded.fish, None);
        assert!(decoded.rice);
    }

    #[test]
    fn test_wire_optional_toppings() {
        let order = Order::new(true, 2).with_garnish(0).with_sauce(1);
        let wire = serde_json::to_value(order).unwrap();
        assert_eq!(wire, json!({ "rice": true, "fish": 2, "garnish": 0, "sauce": 1 }));

        let decoded: Order =
            serde_json::from_value(json!({ "rice": false, "fish": 3, "garnish": null })).unwrap();
        assert_eq!(decoded, Order::new(false, 3));
    }

    #[test]
    fn test_wire_rejects_bad_fish() {
        assert!(serde_json::from_value::<Order>(json!({ "rice": true, "fish": -2 })).is_err());
        assert!(serde_json::from_value::<Order>(json!({ "rice": true, "fish": 300 })).is_err());
        assert!(serde_json::from_value::<Order>(json!({ "fish": 1 })).is_err());
    }

    #[test]
    fn test_validate_catalogue_bounds() {
        assert!(Order::new(true, 4).with_garnish(4).with_sauce(2).validate().is_ok());
        assert_eq!(
            Order::new(true, 5).validate(),
            Err(OrderError::OutOfCatalogue {
                kind: Ingredient::Fish,
                index: 5
            })
        );
        assert_eq!(
            Order::new(true, 0).with_sauce(3).validate(),
            Err(OrderError::OutOfCatalogue {
                kind: Ingredient::Sauce,
                index: 3
            })
        );
        // Toppings without fish are structurally fine.
        assert!(Order::empty().with_garnish(1).validate().is_ok());
    }

    #[test]
    fn test_dish_names() {
        assert_eq!(
            Order::new(true, 0).with_garnish(3).with_sauce(1).dish_name(),
            "Salmon Nigiri with Wasabi and Soy Sauce"
        );
        assert_eq!(Order::new(false, 2).dish_name(), "Tuna Sashimi");
        assert_eq!(Order::empty().dish_name(), "Empty plate");
        assert_eq!(
            Order {
                rice: true,
                ..Order::empty()
            }
            .to_string(),
            "Plain Nigiri"
        );
        assert_eq!(Order::new(false, 9).dish_name(), "Unknown Sashimi");
        assert_eq!(Order::empty().with_sauce(0).dish_name(), "Empty plate with Aioli");
    }

    #[test]
    fn test_layers_keep_index_zero() {
        let order = Order::new(true, 0).with_garnish(0).with_sauce(0);
        assert_eq!(
            order.layers(),
            vec![
                (Ingredient::Rice, 0),
                (Ingredient::Fish, 0),
                (Ingredient::Sauce, 0),
                (Ingredient::Garnish, 0),
            ]
        );
        assert!(Order::empty().layers().is_empty());
    }

    #[test]
    fn test_random_orders_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let order = Order::random(&mut rng);
            assert!(order.fish.is_some());
            assert!(order.validate().is_ok(), "invalid random order {order:?}");
        }
    }
}
