//! What one player's client knows about its match.

use crate::kitchen::{Mismatch, PlacementError, Verdict};
use crate::model::{Order, Ticket};
use crate::protocol::{MatchId, OrderId, Role};

pub const DEFAULT_STARS: u32 = 5;

/// Where the player is in the match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    /// `createMatch` or `joinMatch` sent, waiting for the ack.
    Matching,
    /// Seated in a match, waiting for `gameStart`.
    Waiting,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInfo {
    pub match_id: MatchId,
    pub invite_code: Option<String>,
    pub role: Role,
}

/// The open order: the ticket as received and the plate as built so far.
///
/// For the chef `plate` is the local builder state; for the expo it mirrors the chef's
/// latest progress snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub ticket: Ticket,
    pub plate: Order,
    pub verdict: Option<Verdict>,
}

impl Round {
    pub fn new(ticket: Ticket) -> Self {
        Self {
            ticket,
            plate: Order::empty(),
            verdict: None,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.ticket.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub connected: bool,
    pub match_info: Option<MatchInfo>,
    pub score: i64,
    pub stars: u32,
    pub round: Option<Round>,
    /// Score of the last finished match, shown on the menu.
    pub final_score: Option<i64>,
    starting_stars: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_STARS)
    }
}

impl SessionState {
    pub fn new(starting_stars: u32) -> Self {
        Self {
            phase: Phase::Menu,
            connected: false,
            match_info: None,
            score: 0,
            stars: starting_stars,
            round: None,
            final_score: None,
            starting_stars,
        }
    }

    pub fn starting_stars(&self) -> u32 {
        self.starting_stars
    }

    /// Back to the menu with nothing of the match left, keeping the connection flag.
    pub fn reset(&self) -> Self {
        Self {
            connected: self.connected,
            ..Self::new(self.starting_stars)
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.match_info.as_ref().map(|info| info.role)
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.round.as_ref().map(Round::order_id)
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.round.as_ref().map(|round| &round.ticket)
    }

    pub fn plate(&self) -> Option<&Order> {
        self.round.as_ref().map(|round| &round.plate)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }
}

/// Something the UI should show or the log should record after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    MatchAssigned {
        match_id: MatchId,
        invite_code: Option<String>,
        role: Role,
    },
    MatchRefused(Option<String>),
    GameStarted,
    TicketReceived(OrderId),
    PlateUpdated(Order),
    DishServed(OrderId),
    VerdictSent {
        verdict: Verdict,
        mismatches: Vec<Mismatch>,
    },
    OrderClosed(OrderId),
    /// The coordinator refused the verdict; the order stays open for another one.
    VerdictRefused(OrderId),
    ScoreChanged {
        score: i64,
        stars: u32,
    },
    GameOver {
        final_score: i64,
    },
    ReturnedToMenu,
    PlacementRejected(PlacementError),
    /// The input was not applicable in the current state.
    Ignored(&'static str),
}
