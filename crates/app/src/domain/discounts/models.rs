//! Discount Models

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// How a coupon's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `value` is percent points off the subtotal.
    Percent,
    /// `value` is a fixed amount in minor units.
    Fixed,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent => f.write_str("percent"),
            Self::Fixed => f.write_str("fixed"),
        }
    }
}

/// Coupon record managed in the back office.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRecord {
    pub id: u64,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    /// Percent points or minor units, depending on `kind`.
    pub value: i64,
    #[serde(default)]
    pub min_subtotal_cents: Option<i64>,
    #[serde(default)]
    pub min_qty: Option<u32>,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    #[serde(default)]
    pub starts_at: Option<Timestamp>,
    #[serde(default)]
    pub ends_at: Option<Timestamp>,
    pub active: bool,
}

/// Payload for creating a coupon.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscount {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_subtotal_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_qty: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<Timestamp>,
}

/// Result of validating a coupon against the current cart.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountQuote {
    /// Amount off the subtotal, in minor units.
    #[serde(default)]
    pub discount_cents: i64,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn record_maps_wire_type_field_to_kind() -> TestResult {
        let record: DiscountRecord = serde_json::from_str(
            r#"{"id":1,"code":"TEAM10","type":"percent","value":10,"active":true}"#,
        )?;

        assert_eq!(record.kind, DiscountKind::Percent);
        assert_eq!(record.value, 10);
        assert_eq!(record.used_count, 0);

        Ok(())
    }

    #[test]
    fn quote_defaults_missing_discount_to_zero() -> TestResult {
        let quote: DiscountQuote = serde_json::from_str("{}")?;

        assert_eq!(quote.discount_cents, 0);

        Ok(())
    }
}
