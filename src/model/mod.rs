//! The order model shared by both stations.
//!
//! - [`Order`] - what is on the plate (or what should be).
//! - [`Ticket`] - an order issued by the coordinator, with its id and slip metadata.
//! - [`catalog`] - the fixed ingredient lists the indexes point into.

pub mod catalog;
pub mod order;
pub mod ticket;

pub use catalog::Ingredient;
pub use order::*;
pub use ticket::*;
