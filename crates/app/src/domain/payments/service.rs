//! Payments service.

use async_trait::async_trait;
use mockall::automock;

use crate::api::{Api, ApiError};

use super::models::{PaymentInit, PaymentInitResponse, PaymentVerification, RedirectForm};

/// HTTP client for the payment-gateway adapter endpoints.
#[derive(Debug, Clone)]
pub struct HttpPaymentsService {
    api: Api,
}

impl HttpPaymentsService {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PaymentsService for HttpPaymentsService {
    async fn init_payment(&self, order_id: u64) -> Result<PaymentInit, ApiError> {
        let response = self
            .api
            .http()
            .post(self.api.url("/payments/chapa/init"))
            .json(&serde_json::json!({ "orderId": order_id }))
            .send()
            .await?;

        let body: PaymentInitResponse = self.api.decode(response).await?;

        refine_init(body)
    }

    async fn verify(&self, tx_ref: &str) -> Result<PaymentVerification, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url("/payments/chapa/verify"))
            .query(&[("tx_ref", tx_ref)])
            .send()
            .await?;

        self.api.decode(response).await
    }

    fn receipt_url(&self, customer_receipt_token: &str, download: bool) -> String {
        let mut url = self.api.url(&format!("/receipts/{customer_receipt_token}"));

        if download {
            url.push_str("?download=1");
        }

        url
    }
}

fn refine_init(body: PaymentInitResponse) -> Result<PaymentInit, ApiError> {
    if body.status.as_deref() == Some("paid") {
        if let Some(customer_receipt_token) = body.customer_receipt_token {
            return Ok(PaymentInit::Paid {
                customer_receipt_token,
            });
        }
    }

    match body.action_url {
        Some(action_url) => Ok(PaymentInit::Redirect(RedirectForm {
            action_url,
            fields: body.fields,
        })),
        None => Err(ApiError::UnexpectedResponse(
            "payment init returned neither a paid result nor a redirect form".to_owned(),
        )),
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Initialise payment for an order: either an immediate paid result or
    /// a redirect form for the gateway's hosted page.
    async fn init_payment(&self, order_id: u64) -> Result<PaymentInit, ApiError>;

    /// Poll the gateway for the outcome of a transaction reference.
    async fn verify(&self, tx_ref: &str) -> Result<PaymentVerification, ApiError>;

    /// URL for downloading or viewing a customer receipt.
    fn receipt_url(&self, customer_receipt_token: &str, download: bool) -> String;
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn paid_response_refines_to_paid() -> TestResult {
        let body: PaymentInitResponse = serde_json::from_str(
            r#"{"status":"paid","customerReceiptToken":"rcpt_1"}"#,
        )?;

        assert_eq!(
            refine_init(body)?,
            PaymentInit::Paid {
                customer_receipt_token: "rcpt_1".to_owned(),
            }
        );

        Ok(())
    }

    #[test]
    fn pending_response_refines_to_redirect() -> TestResult {
        let body: PaymentInitResponse = serde_json::from_str(
            r#"{
                "status": "pending",
                "actionUrl": "https://gateway.example.com/pay",
                "fields": {"tx_ref": "tx_1"}
            }"#,
        )?;

        let mut fields = FxHashMap::default();
        fields.insert("tx_ref".to_owned(), "tx_1".to_owned());

        assert_eq!(
            refine_init(body)?,
            PaymentInit::Redirect(RedirectForm {
                action_url: "https://gateway.example.com/pay".to_owned(),
                fields,
            })
        );

        Ok(())
    }

    #[test]
    fn paid_without_token_falls_back_to_redirect_when_possible() -> TestResult {
        let body: PaymentInitResponse = serde_json::from_str(
            r#"{"status":"paid","actionUrl":"https://gateway.example.com/pay"}"#,
        )?;

        assert!(matches!(refine_init(body)?, PaymentInit::Redirect(_)));

        Ok(())
    }

    #[test]
    fn empty_response_is_rejected() -> TestResult {
        let body: PaymentInitResponse = serde_json::from_str("{}")?;

        assert!(matches!(
            refine_init(body),
            Err(ApiError::UnexpectedResponse(_))
        ));

        Ok(())
    }
}
