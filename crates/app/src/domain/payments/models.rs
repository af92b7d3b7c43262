//! Payment Models

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Outcome of initialising a payment for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentInit {
    /// The gateway settled immediately; no redirect is needed.
    Paid {
        /// Token for retrieving the customer's receipt.
        customer_receipt_token: String,
    },
    /// The customer must be sent to the gateway's hosted checkout page.
    Redirect(RedirectForm),
}

/// POST form the storefront submits to the gateway's hosted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectForm {
    pub action_url: String,
    pub fields: FxHashMap<String, String>,
}

impl RedirectForm {
    /// Form fields in a stable order for display.
    #[must_use]
    pub fn sorted_fields(&self) -> Vec<(&str, &str)> {
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        fields.sort_unstable();

        fields
    }
}

/// Raw payment-initialisation payload from the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentInitResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer_receipt_token: Option<String>,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub fields: FxHashMap<String, String>,
}

/// Result of polling the gateway for a transaction reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub customer_receipt_token: Option<String>,
}

impl PaymentVerification {
    /// Whether the gateway reports the payment settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.status == "success" && self.customer_receipt_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn verification_settles_only_with_token() -> TestResult {
        let with_token: PaymentVerification = serde_json::from_str(
            r#"{"status":"success","customerReceiptToken":"rcpt_1"}"#,
        )?;
        let without_token: PaymentVerification = serde_json::from_str(r#"{"status":"success"}"#)?;
        let failed: PaymentVerification =
            serde_json::from_str(r#"{"status":"failed","customerReceiptToken":"rcpt_1"}"#)?;

        assert!(with_token.is_settled());
        assert!(!without_token.is_settled());
        assert!(!failed.is_settled());

        Ok(())
    }

    #[test]
    fn redirect_form_fields_sort_for_display() {
        let mut fields = FxHashMap::default();
        fields.insert("tx_ref".to_owned(), "tx_1".to_owned());
        fields.insert("amount".to_owned(), "1500".to_owned());

        let form = RedirectForm {
            action_url: "https://gateway.example.com/pay".to_owned(),
            fields,
        };

        assert_eq!(
            form.sorted_fields(),
            vec![("amount", "1500"), ("tx_ref", "tx_1")]
        );
    }
}
