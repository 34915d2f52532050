//! Judging a plate against its ticket.
//!
//! The rule is strict field-wise equality: no partial credit, no ordering, and an
//! unrequested garnish or sauce is as wrong as a missing one.

use crate::model::Order;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field on which a plate differs from its ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mismatch {
    Rice,
    Fish,
    Garnish,
    Sauce,
}

/// The expo's decision on a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// `Pass` exactly when the plate matches the ticket.
    pub fn judge(built: &Order, ticket: &Order) -> Self {
        if matches(built, ticket) {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => f.write_str("pass"),
            Verdict::Fail => f.write_str("fail"),
        }
    }
}

/// Every field on which `built` differs from `ticket`, in plate order.
pub fn compare(built: &Order, ticket: &Order) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    if built.rice != ticket.rice {
        mismatches.push(Mismatch::Rice);
    }
    if built.fish != ticket.fish {
        mismatches.push(Mismatch::Fish);
    }
    // Option equality: both absent, or both present and equal.
    if built.garnish != ticket.garnish {
        mismatches.push(Mismatch::Garnish);
    }
    if built.sauce != ticket.sauce {
        mismatches.push(Mismatch::Sauce);
    }
    mismatches
}

pub fn matches(built: &Order, ticket: &Order) -> bool {
    compare(built, ticket).is_empty()
}
