//! # Sushi Line
//!
//! > **The client core of a two-player cooperative sushi game.**
//!
//! One player runs the expo (`player1`): tickets arrive, the plate the chef is building
//! shows up live, and the expo sends a pass or fail verdict. The other runs the line
//! (`player2`): they pick rice, fish, garnish and sauce from the catalogue and serve the
//! dish. A match coordinator seats both, relays their events, and keeps score until the
//! stars run out.
//!
//! ## 🏗️ Design
//!
//! ### Pure rules, actor shell
//! The game rules never touch a channel. [`kitchen`] decides what may be placed and
//! whether a plate matches its ticket; [`session::dispatch`] maps the current
//! [`SessionState`](session::SessionState) and one input to the next state plus the
//! frames to send. The [`session_actor`] hosts sessions in a generic
//! [`ResourceActor`](framework::ResourceActor) and applies those transitions one at a
//! time, so a UI command and an arriving frame never interleave.
//!
//! ### Typed wire
//! Frames are JSON objects tagged by `event`. [`protocol`] decodes them into
//! [`ServerMessage`](protocol::ServerMessage) / [`ClientMessage`](protocol::ClientMessage)
//! and checks every order against the catalogue; anything that does not decode is
//! logged and dropped.
//!
//! ### Loopback coordinator
//! [`relay`] and [`room_actor`] implement the coordinator's side of the contract in
//! process, so two sessions can play a full match in tests and in the demo binary.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: generic actor loop, clients and mocks
//! - [`model`]: orders, tickets, the ingredient catalogue
//! - [`kitchen`]: the order builder and the matcher
//! - [`protocol`]: ids, wire messages, codec
//! - [`session`]: session state and the dispatch table
//! - [`session_actor`], [`room_actor`]: the two hosted entities
//! - [`clients`]: [`SessionClient`](clients::SessionClient), [`RoomClient`](clients::RoomClient)
//! - [`transport`]: the frame transport seam and the connection loop
//! - [`relay`]: the loopback coordinator
//! - [`lifecycle`]: [`GameSystem`](lifecycle::GameSystem), configuration, tracing setup
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Two scripted players run a short match against the loopback coordinator
//! RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod clients;
pub mod framework;
pub mod kitchen;
pub mod lifecycle;
pub mod model;
pub mod protocol;
pub mod relay;
pub mod room_actor;
pub mod session;
pub mod session_actor;
pub mod transport;
