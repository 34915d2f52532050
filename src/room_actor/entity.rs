//! [`ActorEntity`] implementation for [`Room`], one match inside the loopback coordinator.
//!
//! The room owns the authoritative score, stars and open ticket. It talks to its two
//! players only through their [`PeerLink`]s; a link whose connection has gone away is
//! skipped, and that connection's `Leave` ends the match.

use crate::framework::ActorEntity;
use crate::kitchen::Verdict;
use crate::model::{Order, Ticket};
use crate::protocol::{
    CompleteOrder, CompleteOrderAck, GameOver, MatchAck, MatchId, OrderId, OrderUpdate, Role,
    ScoreUpdate, ServerMessage,
};
use crate::room_actor::{PeerLink, RoomAction, RoomError, RoomReply};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const INVITE_PREFIX: &str = "SUSHI-";

/// Store key of a room. The match id and invite code are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomNumber(pub u32);

impl From<u32> for RoomNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room_{}", self.0)
    }
}

impl RoomNumber {
    pub fn match_id(self) -> MatchId {
        MatchId(format!("match_{}", self.0))
    }

    pub fn invite_code(self) -> String {
        format!("{}{:04}", INVITE_PREFIX, self.0)
    }

    /// Inverse of [`RoomNumber::invite_code`]. Case and surrounding space are ignored.
    pub fn from_invite_code(code: &str) -> Result<Self, RoomError> {
        let normalized = code.trim().to_ascii_uppercase();
        normalized
            .strip_prefix(INVITE_PREFIX)
            .and_then(|digits| digits.parse::<u32>().ok())
            .map(RoomNumber)
            .ok_or_else(|| RoomError::BadInviteCode(code.to_string()))
    }
}

/// Scoring rules for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomRules {
    pub starting_stars: u32,
    pub points_per_pass: i64,
    /// Fixes the ticket sequence; `None` draws from entropy.
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub struct RoomCreate {
    pub host: PeerLink,
    pub rules: RoomRules,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub number: RoomNumber,
    pub score: i64,
    pub stars: u32,
    pub open: Option<Ticket>,
    rules: RoomRules,
    host: PeerLink,
    guest: Option<PeerLink>,
    issued: u32,
    rng: StdRng,
    finished: bool,
}

impl Room {
    fn seat(&self, role: Role) -> Option<&PeerLink> {
        match role {
            Role::Player1 => Some(&self.host),
            Role::Player2 => self.guest.as_ref(),
        }
    }

    fn tell(&self, role: Role, message: ServerMessage) {
        if let Some(link) = self.seat(role) {
            if link.send(message).is_err() {
                debug!(room = %self.number, %role, "Peer gone, frame dropped");
            }
        }
    }

    fn broadcast(&self, message: ServerMessage) {
        self.tell(Role::Player2, message.clone());
        self.tell(Role::Player1, message);
    }

    fn open_matches(&self, order_id: &OrderId) -> bool {
        self.open.as_ref().is_some_and(|ticket| &ticket.id == order_id)
    }

    fn issue_ticket(&mut self) {
        self.issued += 1;
        let id = format!("{}-order-{}", self.number.match_id(), self.issued);
        let mut ticket = Ticket::new(id, Order::random(&mut self.rng));
        ticket.table_number = Some(self.rng.gen_range(1..=20));
        ticket.sent_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|elapsed| u64::try_from(elapsed.as_millis()).ok());

        info!(room = %self.number, order_id = %ticket.id, dish = %ticket.order, "Ticket issued");
        self.open = Some(ticket.clone());
        self.broadcast(ServerMessage::NewOrder(ticket));
    }

    fn forward(&self, role: Role, update: &OrderUpdate) -> Option<RoomReply> {
        if !role.is_chef() {
            return Some(RoomReply::Ignored("only the chef builds"));
        }
        if !self.open_matches(&update.order_id) {
            return Some(RoomReply::Ignored("not the open order"));
        }
        None
    }

    fn complete(&mut self, role: Role, verdict: CompleteOrder) -> RoomReply {
        if !role.is_expo() {
            return RoomReply::Ignored("only the expo judges");
        }
        let CompleteOrder { order_id, status } = verdict;
        if !self.open_matches(&order_id) {
            self.tell(
                Role::Player1,
                ServerMessage::CompleteOrderAck(CompleteOrderAck {
                    order_id,
                    success: false,
                }),
            );
            return RoomReply::Ignored("not the open order");
        }

        self.open = None;
        self.tell(
            Role::Player1,
            ServerMessage::CompleteOrderAck(CompleteOrderAck {
                order_id: order_id.clone(),
                success: true,
            }),
        );

        match status {
            Verdict::Pass => self.score += self.rules.points_per_pass,
            Verdict::Fail => self.stars = self.stars.saturating_sub(1),
        }
        info!(room = %self.number, %order_id, %status, score = self.score, stars = self.stars, "Order scored");
        self.broadcast(ServerMessage::ScoreUpdate(ScoreUpdate {
            score: self.score,
            stars: self.stars,
            order_status: Some(status),
            order_id: Some(order_id),
        }));

        if self.stars == 0 {
            self.end();
        } else {
            self.issue_ticket();
        }
        RoomReply::Accepted
    }

    fn end(&mut self) {
        info!(room = %self.number, final_score = self.score, "Match over");
        self.broadcast(ServerMessage::GameOver(GameOver {
            final_score: self.score,
        }));
        self.finished = true;
    }
}

#[async_trait]
impl ActorEntity for Room {
    type Id = RoomNumber;
    type Create = RoomCreate;
    type Action = RoomAction;
    type ActionResult = RoomReply;
    type Context = ();
    type Error = RoomError;

    fn from_create_params(number: RoomNumber, params: RoomCreate) -> Result<Self, RoomError> {
        let rng = match params.rules.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(number.0))),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            number,
            score: 0,
            stars: params.rules.starting_stars,
            open: None,
            rules: params.rules,
            host: params.host,
            guest: None,
            issued: 0,
            rng,
            finished: false,
        })
    }

    /// Acknowledges the host once the room exists.
    async fn on_create(&mut self, _ctx: &()) -> Result<(), RoomError> {
        self.tell(
            Role::Player1,
            ServerMessage::CreateMatchAck(MatchAck::accepted(
                self.number.match_id(),
                self.number.invite_code(),
                Role::Player1,
            )),
        );
        Ok(())
    }

    async fn handle_action(&mut self, action: RoomAction, _ctx: &()) -> Result<RoomReply, RoomError> {
        if self.finished {
            return Ok(RoomReply::Ignored("match is over"));
        }
        match action {
            RoomAction::Join(link) => {
                if self.guest.is_some() {
                    return Err(RoomError::Full(self.number.invite_code()));
                }
                self.guest = Some(link);
                self.tell(
                    Role::Player2,
                    ServerMessage::JoinMatchAck(MatchAck::accepted(
                        self.number.match_id(),
                        self.number.invite_code(),
                        Role::Player2,
                    )),
                );
                self.broadcast(ServerMessage::GameStart);
                Ok(RoomReply::Joined(Role::Player2))
            }
            RoomAction::CreateOrder(role) => {
                if self.guest.is_none() {
                    return Ok(RoomReply::Ignored("waiting for a chef"));
                }
                // Both players ask after gameStart; the second one gets the same ticket.
                match self.open.clone() {
                    Some(ticket) => self.tell(role, ServerMessage::NewOrder(ticket)),
                    None => self.issue_ticket(),
                }
                Ok(RoomReply::Accepted)
            }
            RoomAction::Progress(role, update) => {
                if let Some(refused) = self.forward(role, &update) {
                    return Ok(refused);
                }
                self.tell(Role::Player1, ServerMessage::OrderProgress(update));
                Ok(RoomReply::Accepted)
            }
            RoomAction::Serve(role, update) => {
                if let Some(refused) = self.forward(role, &update) {
                    return Ok(refused);
                }
                self.tell(Role::Player1, ServerMessage::ChefOrderSubmitted(update));
                Ok(RoomReply::Accepted)
            }
            RoomAction::Complete(role, verdict) => Ok(self.complete(role, verdict)),
            RoomAction::Leave(role) => {
                info!(room = %self.number, %role, "Player left");
                match role {
                    Role::Player1 => self.tell(Role::Player2, game_over(self.score)),
                    Role::Player2 => self.tell(Role::Player1, game_over(self.score)),
                }
                self.finished = true;
                Ok(RoomReply::Accepted)
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

fn game_over(final_score: i64) -> ServerMessage {
    ServerMessage::GameOver(GameOver { final_score })
}
