//! Typed wire events.
//!
//! Every frame is a JSON object `{"event": "<name>", "data": <payload>}`. Events without a
//! payload omit `data`. [`ClientMessage`] flows from a player to the coordinator,
//! [`ServerMessage`] flows back.

use crate::kitchen::Verdict;
use crate::model::{Order, OrderError, Ticket};
use crate::protocol::{MatchId, OrderId, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub role_hint: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub invite_code: String,
}

/// A full snapshot of a plate for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub order_id: OrderId,
    pub order: Order,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOrder {
    pub order_id: OrderId,
    pub status: Verdict,
}

/// Answer to `createMatch` and `joinMatch`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MatchAck {
    pub fn accepted(match_id: MatchId, invite_code: impl Into<String>, role: Role) -> Self {
        Self {
            success: true,
            match_id: Some(match_id),
            invite_code: Some(invite_code.into()),
            player_role: Some(role),
            message: None,
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOrderAck {
    pub order_id: OrderId,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub score: i64,
    pub stars: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<Verdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOver {
    pub final_score: i64,
}

/// Events a player sends to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    CreateMatch(MatchRequest),
    JoinMatch(JoinRequest),
    CreateOrder,
    OrderProgress(OrderUpdate),
    ServeDish(OrderUpdate),
    CompleteOrder(CompleteOrder),
}

/// Events the coordinator sends to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    CreateMatchAck(MatchAck),
    JoinMatchAck(MatchAck),
    GameStart,
    NewOrder(Ticket),
    OrderProgress(OrderUpdate),
    ChefOrderSubmitted(OrderUpdate),
    CompleteOrderAck(CompleteOrderAck),
    ScoreUpdate(ScoreUpdate),
    GameOver(GameOver),
}

/// A message type that can travel as one frame.
pub trait Frame: Serialize + serde::de::DeserializeOwned {
    /// The `event` tag, for diagnostics.
    fn event(&self) -> &'static str;

    /// Catalogue check for any order carried by the frame.
    fn validate(&self) -> Result<(), OrderError>;
}

impl Frame for ClientMessage {
    fn event(&self) -> &'static str {
        match self {
            ClientMessage::CreateMatch(_) => "createMatch",
            ClientMessage::JoinMatch(_) => "joinMatch",
            ClientMessage::CreateOrder => "createOrder",
            ClientMessage::OrderProgress(_) => "orderProgress",
            ClientMessage::ServeDish(_) => "serveDish",
            ClientMessage::CompleteOrder(_) => "completeOrder",
        }
    }

    fn validate(&self) -> Result<(), OrderError> {
        match self {
            ClientMessage::OrderProgress(update) | ClientMessage::ServeDish(update) => {
                update.order.validate()
            }
            _ => Ok(()),
        }
    }
}

impl Frame for ServerMessage {
    fn event(&self) -> &'static str {
        match self {
            ServerMessage::CreateMatchAck(_) => "createMatchAck",
            ServerMessage::JoinMatchAck(_) => "joinMatchAck",
            ServerMessage::GameStart => "gameStart",
            ServerMessage::NewOrder(_) => "newOrder",
            ServerMessage::OrderProgress(_) => "orderProgress",
            ServerMessage::ChefOrderSubmitted(_) => "chefOrderSubmitted",
            ServerMessage::CompleteOrderAck(_) => "completeOrderAck",
            ServerMessage::ScoreUpdate(_) => "scoreUpdate",
            ServerMessage::GameOver(_) => "gameOver",
        }
    }

    fn validate(&self) -> Result<(), OrderError> {
        match self {
            ServerMessage::NewOrder(ticket) => ticket.validate(),
            ServerMessage::OrderProgress(update) | ServerMessage::ChefOrderSubmitted(update) => {
                update.order.validate()
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_events_omit_data() {
        let wire = serde_json::to_value(ClientMessage::CreateOrder).unwrap();
        assert_eq!(wire, json!({ "event": "createOrder" }));

        let start: ServerMessage = serde_json::from_value(json!({ "event": "gameStart" })).unwrap();
        assert_eq!(start, ServerMessage::GameStart);
    }

    #[test]
    fn test_complete_order_shape() {
        let msg = ClientMessage::CompleteOrder(CompleteOrder {
            order_id: OrderId::from("o1"),
            status: Verdict::Fail,
        });
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "event": "completeOrder", "data": { "orderId": "o1", "status": "fail" } })
        );
        assert_eq!(msg.event(), "completeOrder");
    }

    #[test]
    fn test_match_ack_decodes_partial_payload() {
        let msg: ServerMessage = serde_json::from_value(json!({
            "event": "createMatchAck",
            "data": { "success": true, "matchId": "match_1", "inviteCode": "SUSHI-1", "playerRole": "player1" }
        }))
        .unwrap();
        assert_eq!(
            msg,
            ServerMessage::CreateMatchAck(MatchAck::accepted(
                MatchId::from("match_1"),
                "SUSHI-1",
                Role::Player1
            ))
        );
    }

    #[test]
    fn test_score_update_optional_fields() {
        let msg: ServerMessage = serde_json::from_value(json!({
            "event": "scoreUpdate",
            "data": { "score": 20, "stars": 4 }
        }))
        .unwrap();
        let ServerMessage::ScoreUpdate(update) = msg else {
            panic!("expected scoreUpdate");
        };
        assert_eq!(update.order_status, None);
        assert_eq!(update.order_id, None);
    }

    #[test]
    fn test_validate_rejects_bad_ticket() {
        let msg = ServerMessage::NewOrder(Ticket::new("o1", Order::new(true, 9)));
        assert!(msg.validate().is_err());
        assert!(ServerMessage::GameStart.validate().is_ok());
    }
}
