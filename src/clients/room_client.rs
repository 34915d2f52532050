use crate::framework::{ActorClient, ResourceClient};
use crate::protocol::{CompleteOrder, OrderUpdate, Role};
use crate::room_actor::{PeerLink, Room, RoomAction, RoomCreate, RoomError, RoomNumber, RoomReply};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the loopback coordinator's rooms.
#[derive(Clone)]
pub struct RoomClient {
    inner: ResourceClient<Room>,
}

#[async_trait]
impl ActorClient<Room> for RoomClient {
    type Error = RoomError;

    fn inner(&self) -> &ResourceClient<Room> {
        &self.inner
    }
}

impl RoomClient {
    pub fn new(inner: ResourceClient<Room>) -> Self {
        Self { inner }
    }

    /// Opens a room with `params.host` seated as the expo.
    #[instrument(skip(self, params))]
    pub async fn open(&self, params: RoomCreate) -> Result<RoomNumber, RoomError> {
        debug!(rules = ?params.rules, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Seats `link` as the chef of the room behind `invite_code`.
    #[instrument(skip(self, link))]
    pub async fn join(&self, invite_code: &str, link: PeerLink) -> Result<(RoomNumber, Role), RoomError> {
        let number = RoomNumber::from_invite_code(invite_code)?;
        match self.act(number, RoomAction::Join(link)).await? {
            RoomReply::Joined(role) => Ok((number, role)),
            // A finished room is on its way out of the store.
            _ => Err(RoomError::NotFound(number.to_string())),
        }
    }

    pub async fn create_order(&self, number: RoomNumber, role: Role) -> Result<RoomReply, RoomError> {
        self.act(number, RoomAction::CreateOrder(role)).await
    }

    pub async fn progress(
        &self,
        number: RoomNumber,
        role: Role,
        update: OrderUpdate,
    ) -> Result<RoomReply, RoomError> {
        self.act(number, RoomAction::Progress(role, update)).await
    }

    pub async fn serve(
        &self,
        number: RoomNumber,
        role: Role,
        update: OrderUpdate,
    ) -> Result<RoomReply, RoomError> {
        self.act(number, RoomAction::Serve(role, update)).await
    }

    pub async fn complete(
        &self,
        number: RoomNumber,
        role: Role,
        verdict: CompleteOrder,
    ) -> Result<RoomReply, RoomError> {
        self.act(number, RoomAction::Complete(role, verdict)).await
    }

    pub async fn leave(&self, number: RoomNumber, role: Role) -> Result<RoomReply, RoomError> {
        self.act(number, RoomAction::Leave(role)).await
    }

    #[instrument(skip(self, action))]
    async fn act(&self, number: RoomNumber, action: RoomAction) -> Result<RoomReply, RoomError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(number, action)
            .await
            .map_err(Self::map_error)
    }
}
