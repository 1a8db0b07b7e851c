//! Order model

use crate::core::error::{BistroError, BistroResult};
use crate::core::id::RecordId;
use crate::core::payload::{validated_integer, validated_text};
use crate::core::validation::Deletable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Delivery state of an order
///
/// Clients may set any of these on update; there is no enforced transition
/// graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Wire names, in lifecycle order
    pub const NAMES: &'static [&'static str] =
        &["pending", "preparing", "out-for-delivery", "delivered"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "preparing" => Some(OrderStatus::Preparing),
            "out-for-delivery" => Some(OrderStatus::OutForDelivery),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dish line of an order
///
/// Besides the quantity, whatever dish fields the client sent (id, name,
/// price, ...) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity: u64,
    #[serde(flatten)]
    pub dish: Map<String, Value>,
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    pub deliver_to: String,
    pub mobile_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    pub dishes: Vec<OrderLine>,
}

impl_record!(Order, "Order", "orders");

impl Deletable for Order {
    /// Only pending orders may be removed
    fn is_deletable(&self) -> bool {
        self.status == Some(OrderStatus::Pending)
    }
}

/// Order fields taken from a validated payload
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: Option<OrderStatus>,
    pub dishes: Vec<OrderLine>,
}

impl OrderDraft {
    pub fn from_payload(data: &Map<String, Value>) -> BistroResult<Self> {
        let status = match data.get("status") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_str()
                    .and_then(OrderStatus::parse)
                    .ok_or_else(|| {
                        BistroError::Internal("order status reached a handler unvalidated".into())
                    })?,
            ),
        };

        let dishes = data
            .get("dishes")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                BistroError::Internal("order dishes reached a handler unvalidated".into())
            })?
            .iter()
            .map(OrderLine::from_value)
            .collect::<BistroResult<Vec<_>>>()?;

        Ok(Self {
            deliver_to: validated_text(data, "deliverTo")?,
            mobile_number: validated_text(data, "mobileNumber")?,
            status,
            dishes,
        })
    }

    pub fn into_order(self, id: RecordId) -> Order {
        Order {
            id,
            deliver_to: self.deliver_to,
            mobile_number: self.mobile_number,
            status: self.status,
            dishes: self.dishes,
        }
    }
}

impl OrderLine {
    fn from_value(value: &Value) -> BistroResult<Self> {
        let mut dish = value
            .as_object()
            .cloned()
            .ok_or_else(|| BistroError::Internal("order line is not an object".into()))?;
        let quantity = validated_integer(dish.get("quantity"), "quantity")?;
        dish.remove("quantity");

        Ok(Self { quantity, dish })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_status_wire_names() {
        for name in OrderStatus::NAMES {
            let status = OrderStatus::parse(name).unwrap();
            assert_eq!(status.as_str(), *name);
            assert_eq!(serde_json::to_value(status).unwrap(), json!(name));
        }
        assert!(OrderStatus::parse("cancelled").is_none());
    }

    #[test]
    fn test_draft_keeps_dish_details() {
        let draft = OrderDraft::from_payload(&payload(json!({
            "deliverTo": "308 Negra Arroyo Lane",
            "mobileNumber": "(505) 143-3369",
            "status": "preparing",
            "dishes": [{ "id": 4, "name": "Taco", "price": 5, "quantity": 2 }]
        })))
        .unwrap();

        assert_eq!(draft.status, Some(OrderStatus::Preparing));
        assert_eq!(draft.dishes.len(), 1);
        assert_eq!(draft.dishes[0].quantity, 2);
        assert_eq!(draft.dishes[0].dish["name"], "Taco");
        assert!(!draft.dishes[0].dish.contains_key("quantity"));
    }

    #[test]
    fn test_order_json_uses_camel_case() {
        let order = OrderDraft::from_payload(&payload(json!({
            "deliverTo": "here",
            "mobileNumber": "555",
            "dishes": [{ "quantity": 1 }]
        })))
        .unwrap()
        .into_order(2);

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 2,
                "deliverTo": "here",
                "mobileNumber": "555",
                "dishes": [{ "quantity": 1 }]
            })
        );

        let back: Order = serde_json::from_value(value).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_only_pending_is_deletable() {
        let mut order = OrderDraft::from_payload(&payload(json!({
            "deliverTo": "here",
            "mobileNumber": "555",
            "status": "pending",
            "dishes": [{ "quantity": 1 }]
        })))
        .unwrap()
        .into_order(1);
        assert!(order.is_deletable());

        order.status = Some(OrderStatus::Delivered);
        assert!(!order.is_deletable());

        order.status = None;
        assert!(!order.is_deletable());
    }
}
