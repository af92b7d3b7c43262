//! Order Models

use dink::orders::OrderStatus;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One `{productId, quantity}` pair submitted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: u64,
    pub quantity: u32,
}

/// Payload for creating an order from a cart snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<OrderLineItem>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// Order record as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: u64,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address: String,
    #[serde(default)]
    pub selected_size: Option<String>,
    #[serde(default)]
    pub selected_color: Option<String>,
    #[serde(default)]
    pub delivery_preferences: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Order total in major currency units.
    #[must_use]
    pub fn total(&self) -> Decimal {
        Decimal::new(self.total_cents, 2)
    }
}

/// Dashboard summary counters served by the `/meta` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSummary {
    pub products: u64,
    pub bundles: u64,
    pub orders: u64,
    pub leads: u64,
    pub discounts: u64,
    /// Revenue in major currency units.
    pub revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_record_exposes_major_unit_total() -> TestResult {
        let order: OrderRecord = serde_json::from_str(
            r#"{
                "id": 42,
                "orderNumber": "DNK-0042",
                "customerName": "Abebe Bikila",
                "customerEmail": "abebe@example.com",
                "customerPhone": "+251900000000",
                "address": "Addis Ababa",
                "status": "pending",
                "totalCents": 150050,
                "createdAt": "2025-06-01T10:00:00Z",
                "updatedAt": "2025-06-01T10:00:00Z"
            }"#,
        )?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total(), "1500.50".parse()?);

        Ok(())
    }

    #[test]
    fn new_order_serialises_camel_case_and_skips_absent_fields() -> TestResult {
        let order = NewOrder {
            items: vec![OrderLineItem {
                product_id: 7,
                quantity: 3,
            }],
            customer_name: "Abebe Bikila".to_owned(),
            customer_email: "abebe@example.com".to_owned(),
            customer_phone: "+251900000000".to_owned(),
            address: "Addis Ababa".to_owned(),
            delivery_preferences: None,
            notes: None,
            coupon_code: Some("TEAM10".to_owned()),
        };

        let json = serde_json::to_value(&order)?;

        assert_eq!(
            json.get("items")
                .and_then(|items| items.get(0))
                .and_then(|item| item.get("productId"))
                .and_then(serde_json::Value::as_u64),
            Some(7)
        );
        assert!(json.get("notes").is_none(), "absent notes should be skipped");
        assert_eq!(
            json.get("couponCode").and_then(serde_json::Value::as_str),
            Some("TEAM10")
        );

        Ok(())
    }
}
