//! Identifiers that appear on the wire or key an actor's store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinator-assigned id of one order/ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

/// Coordinator-assigned id of a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(OrderId);
string_id!(MatchId);

/// Local handle of a player session inside the session actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u32);

impl From<u32> for SessionId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

/// The seat a player was given by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The expo, who receives tickets and judges dishes.
    Player1,
    /// The chef, who builds dishes.
    Player2,
}

/// What a role does in the kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Station {
    Expo,
    Chef,
}

impl Role {
    pub fn station(self) -> Station {
        match self {
            Role::Player1 => Station::Expo,
            Role::Player2 => Station::Chef,
        }
    }

    pub fn is_chef(self) -> bool {
        self.station() == Station::Chef
    }

    pub fn is_expo(self) -> bool {
        self.station() == Station::Expo
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player1 => f.write_str("player1"),
            Role::Player2 => f.write_str("player2"),
        }
    }
}
