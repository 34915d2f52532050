use crate::model::{Order, OrderError};
use crate::protocol::OrderId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_NAME: &str = "Server Name";
pub const DEFAULT_TABLE_NUMBER: u32 = 12;

/// The order a customer asked for, as delivered by the coordinator.
///
/// A ticket is never mutated while its order is open; the chef's plate lives in a
/// separate [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: OrderId,
    pub order: Order,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    /// Milliseconds since the unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_time: Option<u64>,
}

impl Ticket {
    pub fn new(id: impl Into<OrderId>, order: Order) -> Self {
        Self {
            id: id.into(),
            order,
            server_name: None,
            table_number: None,
            sent_time: None,
        }
    }

    pub fn with_server(mut self, name: impl Into<String>, table: u32) -> Self {
        self.server_name = Some(name.into());
        self.table_number = Some(table);
        self
    }

    pub fn with_sent_time(mut self, millis: u64) -> Self {
        self.sent_time = Some(millis);
        self
    }

    pub fn server_name(&self) -> &str {
        self.server_name.as_deref().unwrap_or(DEFAULT_SERVER_NAME)
    }

    pub fn table_number(&self) -> u32 {
        self.table_number.unwrap_or(DEFAULT_TABLE_NUMBER)
    }

    pub fn validate(&self) -> Result<(), OrderError> {
        self.order.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_defaults() {
        let ticket = Ticket::new("order-1", Order::new(true, 0));
        assert_eq!(ticket.server_name(), "Server Name");
        assert_eq!(ticket.table_number(), 12);

        let ticket = ticket.with_server("Aiko", 3);
        assert_eq!(ticket.server_name(), "Aiko");
        assert_eq!(ticket.table_number(), 3);
    }

    #[test]
    fn test_wire_shape() {
        let ticket = Ticket::new("order-7", Order::new(false, 1).with_sauce(2)).with_sent_time(1_000);
        let wire = serde_json::to_value(&ticket).unwrap();
        assert_eq!(
            wire,
            json!({
                "id": "order-7",
                "order": { "rice": false, "fish": 1, "sauce": 2 },
                "sentTime": 1000
            })
        );

        let decoded: Ticket = serde_json::from_value(json!({
            "id": "order-8",
            "order": { "rice": true, "fish": 4 },
            "serverName": "Ken",
            "tableNumber": 5
        }))
        .unwrap();
        assert_eq!(decoded.id, OrderId::from("order-8"));
        assert_eq!(decoded.server_name(), "Ken");
        assert_eq!(decoded.sent_time, None);
    }

    #[test]
    fn test_validate_uses_order() {
        assert!(Ticket::new("a", Order::new(true, 6)).validate().is_err());
    }
}
