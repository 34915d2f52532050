use crate::framework::{ActorClient, ResourceClient};
use crate::kitchen::PlacementStep;
use crate::protocol::{ServerMessage, SessionId};
use crate::session::{Command, Input, SessionState};
use crate::session_actor::{Session, SessionError, SessionOutcome};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Handle on one player's session.
///
/// UI code calls the command methods; the connection loop feeds frames in with
/// [`receive`](SessionClient::receive) and reports link changes with
/// [`connected`](SessionClient::connected) and [`disconnected`](SessionClient::disconnected).
#[derive(Clone)]
pub struct SessionClient {
    inner: ResourceClient<Session>,
    id: SessionId,
}

#[async_trait]
impl ActorClient<Session> for SessionClient {
    type Error = SessionError;

    fn inner(&self) -> &ResourceClient<Session> {
        &self.inner
    }
}

impl SessionClient {
    pub fn new(inner: ResourceClient<Session>, id: SessionId) -> Self {
        Self { inner, id }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    async fn send(&self, input: Input) -> Result<SessionOutcome, SessionError> {
        self.inner
            .perform_action(self.id, input)
            .await
            .map_err(Self::map_error)
    }

    async fn command(&self, command: Command) -> Result<SessionOutcome, SessionError> {
        debug!("Sending request");
        self.send(Input::Command(command)).await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn create_match(&self) -> Result<SessionOutcome, SessionError> {
        self.command(Command::CreateMatch).await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn join_match(&self, invite_code: &str) -> Result<SessionOutcome, SessionError> {
        self.command(Command::JoinMatch(invite_code.to_string())).await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn place_rice(&self) -> Result<SessionOutcome, SessionError> {
        self.command(Command::Place(PlacementStep::Rice)).await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn place_fish(&self, index: u8) -> Result<SessionOutcome, SessionError> {
        self.command(Command::Place(PlacementStep::Fish(index))).await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn place_garnish(&self, index: u8) -> Result<SessionOutcome, SessionError> {
        self.command(Command::Place(PlacementStep::Garnish(index))).await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn place_sauce(&self, index: u8) -> Result<SessionOutcome, SessionError> {
        self.command(Command::Place(PlacementStep::Sauce(index))).await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn clear_plate(&self) -> Result<SessionOutcome, SessionError> {
        self.command(Command::ClearPlate).await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn serve_dish(&self) -> Result<SessionOutcome, SessionError> {
        self.command(Command::ServeDish).await
    }

    /// Judges the plate against the ticket and sends the verdict.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn submit(&self) -> Result<SessionOutcome, SessionError> {
        self.command(Command::Submit).await
    }

    /// Sends a `fail` verdict regardless of the plate.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn reject(&self) -> Result<SessionOutcome, SessionError> {
        self.command(Command::Reject).await
    }

    pub async fn receive(&self, message: ServerMessage) -> Result<SessionOutcome, SessionError> {
        self.send(Input::Inbound(message)).await
    }

    pub async fn connected(&self) -> Result<SessionOutcome, SessionError> {
        self.send(Input::Connected).await
    }

    pub async fn disconnected(&self) -> Result<SessionOutcome, SessionError> {
        self.send(Input::Disconnected).await
    }

    /// Current state of the session.
    pub async fn snapshot(&self) -> Result<SessionState, SessionError> {
        self.fetch(self.id)
            .await?
            .map(|session| session.state)
            .ok_or_else(|| SessionError::NotFound(self.id.to_string()))
    }

    /// Closes the session. Its connection loop then shuts down.
    pub async fn close(&self) -> Result<(), SessionError> {
        self.remove(self.id).await
    }
}
