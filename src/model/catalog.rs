//! Fixed, ordered ingredient catalogues.
//!
//! Orders refer to ingredients by index, so the order of these tables is part of the
//! wire contract. Each entry lists display aliases; the first one is canonical.

use std::fmt;

const FISH: &[&[&str]] = &[
    &["Salmon", "Sake"],
    &["Tamago", "Egg", "Japanese Omelet"],
    &["Tuna", "Maguro", "Bluefin"],
    &["Whitefish", "Shiromi", "Bass"],
    &["Yellowtail", "Hamachi", "Kampachi"],
];

const GARNISH: &[&[&str]] = &[
    &["Ginger", "Gari"],
    &["Momiji", "Red Chili Paste"],
    &["Ume", "Umeboshi", "Pickled Plum"],
    &["Wasabi", "Japanese Horseradish"],
    &["Yuzu Kosho", "Yuzu", "Green Chili Paste"],
];

const SAUCE: &[&[&str]] = &[
    &["Aioli", "Mayo"],
    &["Soy Sauce", "Shoyu"],
    &["Sriracha", "Hot Sauce", "Chili Sauce"],
];

const RICE: &[&[&str]] = &[&["Nigiri", "On Rice"]];

/// Name used for a dish served without rice.
pub const NO_RICE: &str = "Sashimi";

/// The kinds of ingredient a chef can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ingredient {
    Rice,
    Fish,
    Garnish,
    Sauce,
}

impl Ingredient {
    fn table(self) -> &'static [&'static [&'static str]] {
        match self {
            Ingredient::Rice => RICE,
            Ingredient::Fish => FISH,
            Ingredient::Garnish => GARNISH,
            Ingredient::Sauce => SAUCE,
        }
    }

    /// Number of entries in this catalogue.
    pub fn len(self) -> usize {
        self.table().len()
    }

    pub fn contains(self, index: u8) -> bool {
        usize::from(index) < self.len()
    }

    /// Canonical display name, or `None` for an index outside the catalogue.
    pub fn name(self, index: u8) -> Option<&'static str> {
        self.aliases(index).and_then(|names| names.first().copied())
    }

    /// Every display alias of an entry.
    pub fn aliases(self, index: u8) -> Option<&'static [&'static str]> {
        self.table().get(usize::from(index)).copied()
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Ingredient::Rice => "rice",
            Ingredient::Fish => "fish",
            Ingredient::Garnish => "garnish",
            Ingredient::Sauce => "sauce",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_sizes() {
        assert_eq!(Ingredient::Fish.len(), 5);
        assert_eq!(Ingredient::Garnish.len(), 5);
        assert_eq!(Ingredient::Sauce.len(), 3);
        assert_eq!(Ingredient::Rice.len(), 1);
    }

    #[test]
    fn test_names_and_bounds() {
        assert_eq!(Ingredient::Fish.name(2), Some("Tuna"));
        assert_eq!(Ingredient::Garnish.name(4), Some("Yuzu Kosho"));
        assert_eq!(Ingredient::Sauce.name(1), Some("Soy Sauce"));
        assert_eq!(Ingredient::Rice.name(0), Some("Nigiri"));
        assert_eq!(Ingredient::Sauce.name(3), None);
        assert!(!Ingredient::Fish.contains(5));
        assert_eq!(
            Ingredient::Fish.aliases(1),
            Some(&["Tamago", "Egg", "Japanese Omelet"][..])
        );
    }
}
