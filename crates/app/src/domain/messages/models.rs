//! Message Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Contact-form submission.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Message record in the back-office inbox.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn record_defaults_read_flag() -> TestResult {
        let record: MessageRecord = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Sara",
                "email": "sara@example.com",
                "message": "Do you ship to Hawassa?",
                "createdAt": "2025-06-01T10:00:00Z"
            }"#,
        )?;

        assert!(!record.read);
        assert_eq!(record.subject, "");

        Ok(())
    }
}
