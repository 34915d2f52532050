//! [`ActorEntity`] implementation for [`Session`].
//!
//! Each action is one [`Input`] run through [`session::dispatch`](crate::session::dispatch).
//! Outbound frames are queued on the session's outbox before the new state is committed,
//! so a session whose connection has gone away keeps its last state.

use crate::framework::ActorEntity;
use crate::protocol::{ClientMessage, SessionId};
use crate::session::{dispatch, Input, Notice, Phase, SessionState};
use crate::session_actor::SessionError;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Sending half of a connection's outbound queue.
pub type Outbox = mpsc::UnboundedSender<ClientMessage>;

/// Parameters for opening a session.
#[derive(Debug)]
pub struct SessionCreate {
    pub outbox: Outbox,
    pub starting_stars: u32,
}

/// One local player: their match state plus the queue their frames leave through.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub state: SessionState,
    outbox: Outbox,
}

/// What a single input did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOutcome {
    pub phase: Phase,
    pub notices: Vec<Notice>,
    /// Number of frames queued for the coordinator.
    pub sent: usize,
}

impl SessionOutcome {
    pub fn was_ignored(&self) -> bool {
        matches!(self.notices.as_slice(), [Notice::Ignored(_)])
    }
}

#[async_trait]
impl ActorEntity for Session {
    type Id = SessionId;
    type Create = SessionCreate;
    type Action = Input;
    type ActionResult = SessionOutcome;
    type Context = ();
    type Error = SessionError;

    fn from_create_params(id: SessionId, params: SessionCreate) -> Result<Self, SessionError> {
        Ok(Self {
            id,
            state: SessionState::new(params.starting_stars),
            outbox: params.outbox,
        })
    }

    async fn handle_action(
        &mut self,
        input: Input,
        _ctx: &(),
    ) -> Result<SessionOutcome, SessionError> {
        let transition = dispatch(&self.state, input);

        let sent = transition.outbound.len();
        for message in transition.outbound {
            self.outbox
                .send(message)
                .map_err(|_| SessionError::OutboxClosed)?;
        }

        for notice in &transition.notices {
            match notice {
                Notice::PlacementRejected(error) => {
                    warn!(session = %self.id, %error, "Placement rejected")
                }
                Notice::Ignored(reason) => debug!(session = %self.id, reason, "Input ignored"),
                Notice::VerdictSent {
                    verdict,
                    mismatches,
                } => info!(session = %self.id, %verdict, ?mismatches, "Verdict sent"),
                Notice::VerdictRefused(order_id) => {
                    warn!(session = %self.id, %order_id, "Verdict refused")
                }
                other => debug!(session = %self.id, notice = ?other, "Notice"),
            }
        }

        if transition.state.phase != self.state.phase {
            info!(
                session = %self.id,
                from = ?self.state.phase,
                to = ?transition.state.phase,
                "Phase changed"
            );
        }
        self.state = transition.state;

        Ok(SessionOutcome {
            phase: self.state.phase,
            notices: transition.notices,
            sent,
        })
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), SessionError> {
        debug!(session = %self.id, phase = ?self.state.phase, "Closing session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MatchRequest, Role};
    use crate::session::Command;

    fn open() -> (Session, mpsc::UnboundedReceiver<ClientMessage>) {
        let (outbox, frames) = mpsc::unbounded_channel();
        let session = Session::from_create_params(
            SessionId(1),
            SessionCreate {
                outbox,
                starting_stars: 3,
            },
        )
        .unwrap();
        (session, frames)
    }

    #[tokio::test]
    async fn test_outbound_frames_reach_outbox() {
        let (mut session, mut frames) = open();
        session.handle_action(Input::Connected, &()).await.unwrap();
        let outcome = session
            .handle_action(Command::CreateMatch.into(), &())
            .await
            .unwrap();

        assert_eq!(outcome.phase, Phase::Matching);
        assert_eq!(outcome.sent, 1);
        assert_eq!(
            frames.recv().await,
            Some(ClientMessage::CreateMatch(MatchRequest {
                role_hint: Role::Player1
            }))
        );
        assert_eq!(session.state.stars, 3);
    }

    #[tokio::test]
    async fn test_closed_outbox_keeps_state() {
        let (mut session, frames) = open();
        session.handle_action(Input::Connected, &()).await.unwrap();
        drop(frames);

        let result = session.handle_action(Command::CreateMatch.into(), &()).await;
        assert!(matches!(result, Err(SessionError::OutboxClosed)));
        assert_eq!(session.state.phase, Phase::Menu);

        // Inputs that send nothing still apply.
        let outcome = session.handle_action(Input::Disconnected, &()).await.unwrap();
        assert_eq!(outcome.phase, Phase::Menu);
        assert!(!session.state.connected);
    }
}
