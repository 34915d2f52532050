//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by `RUST_LOG`.
//! Module paths are hidden (`with_target(false)`); the actor loop tags its lines with
//! `entity_type` instead, and session and room lines carry `session` / `room` fields.
//!
//! ```bash
//! # Phase changes, tickets, scores
//! RUST_LOG=info cargo run
//!
//! # Every frame in and out, ignored inputs, full action payloads
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a round reads:
//!
//! ```text
//! INFO Ticket issued room=room_1 order_id=match_1-order-1 dish=Tuna Nigiri with Ginger
//! INFO expo_round: Verdict sent session=session_1 verdict=pass mismatches=[]
//! INFO Order scored room=room_1 order_id=match_1-order-1 status=pass score=10 stars=5
//! ```
//!
//! Spans opened in `main` (`matchmaking`, `chef_round`, `expo_round`) show inline as
//! prefixes.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type / session / room fields say where a line came from
        .compact()
        .init();
}
