use crate::clients::SessionClient;
use crate::framework::ResourceClient;
use crate::lifecycle::ClientConfig;
use crate::relay::Relay;
use crate::session_actor::{Session, SessionCreate, SessionError};
use crate::transport;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// The runtime orchestrator: a session actor for local players, a room actor behind a
/// loopback relay, and one connection task pair per player.
///
/// # Example
///
/// ```ignore
/// let mut system = GameSystem::new(ClientConfig::default());
/// let expo = system.connect_player().await?;
/// let chef = system.connect_player().await?;
///
/// expo.create_match().await?;
/// // ... read the invite code from expo.snapshot(), then chef.join_match(code) ...
///
/// system.shutdown().await?;
/// ```
pub struct GameSystem {
    config: ClientConfig,
    sessions: ResourceClient<Session>,
    relay: Relay,
    players: Vec<SessionClient>,
    /// Actor tasks, awaited last on shutdown.
    actors: Vec<JoinHandle<()>>,
    /// Connection and relay tasks.
    connections: Vec<JoinHandle<()>>,
}

impl GameSystem {
    /// Spawns both actors and the relay. Must be called inside a Tokio runtime.
    pub fn new(config: ClientConfig) -> Self {
        // 1. Create actors
        let (session_actor, sessions) = crate::session_actor::new(config.mailbox_capacity);
        let (room_actor, rooms) = crate::room_actor::new(config.mailbox_capacity);

        // 2. Start actors; neither needs context
        let session_handle = tokio::spawn(session_actor.run(()));
        let room_handle = tokio::spawn(room_actor.run(()));

        let relay = Relay::new(rooms, config.room_rules());
        info!(?config, "Game system started");

        Self {
            config,
            sessions,
            relay,
            players: Vec::new(),
            actors: vec![session_handle, room_handle],
            connections: Vec::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Opens a session and connects it to the loopback relay.
    ///
    /// The returned client is already connected and sitting on the menu.
    pub async fn connect_player(&mut self) -> Result<SessionClient, SystemError> {
        let (outbox, frames) = mpsc::unbounded_channel();
        let id = self
            .sessions
            .create(SessionCreate {
                outbox,
                starting_stars: self.config.starting_stars,
            })
            .await
            .map_err(SessionError::from)?;
        let player = SessionClient::new(self.sessions.clone(), id);

        let (link, relay_task) = self.relay.connect();
        self.connections.push(relay_task);
        self.connections
            .push(transport::connect(link, frames, player.clone()).await?);

        info!(session = %id, "Player connected");
        self.players.push(player.clone());
        Ok(player)
    }

    /// Closes every session, lets the connections drain, then stops the actors.
    ///
    /// Closing a session drops its outbox, which ends its connection task, which closes
    /// the relay's side, which ends the relay task and leaves its room. Once those tasks
    /// are gone the last clients are dropped and the actor loops exit.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        for player in &self.players {
            if let Err(e) = player.close().await {
                warn!(session = %player.id(), error = %e, "Session already closed");
            }
        }
        drop(self.players);
        drop(self.sessions);
        drop(self.relay);

        for handle in self.connections.into_iter().chain(self.actors) {
            if let Err(e) = handle.await {
                error!("Task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
