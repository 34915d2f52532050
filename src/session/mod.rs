//! One player's view of a match as an explicit value.
//!
//! [`SessionState`] holds everything the client knows. [`dispatch`] is a pure function
//! from the current state and one [`Input`] to a [`Transition`]: the next state, the
//! frames to send, and the notices to surface. The session actor applies transitions; it
//! holds no game logic of its own.

mod handlers;
mod state;

pub use handlers::dispatch;
pub use state::*;

use crate::kitchen::PlacementStep;
use crate::protocol::{ClientMessage, ServerMessage};

/// A UI request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateMatch,
    JoinMatch(String),
    Place(PlacementStep),
    ClearPlate,
    ServeDish,
    Submit,
    Reject,
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Connected,
    Disconnected,
    Command(Command),
    Inbound(ServerMessage),
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        Input::Command(command)
    }
}

impl From<ServerMessage> for Input {
    fn from(message: ServerMessage) -> Self {
        Input::Inbound(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub outbound: Vec<ClientMessage>,
    pub notices: Vec<Notice>,
}

impl Transition {
    fn unchanged(state: &SessionState) -> Self {
        Self {
            state: state.clone(),
            outbound: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn send(&mut self, message: ClientMessage) {
        self.outbound.push(message);
    }

    fn ignore(&mut self, reason: &'static str) {
        self.notices.push(Notice::Ignored(reason));
    }

    /// True when the input was refused by a guard.
    pub fn is_ignored(&self) -> bool {
        matches!(self.notices.as_slice(), [Notice::Ignored(_)])
    }
}
