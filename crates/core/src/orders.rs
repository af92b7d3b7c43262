//! Order status rules.
//!
//! The finite transition table the back office consults before asking the
//! backend to move an order. The backend re-validates every change; this
//! table only keeps callers from offering impossible moves.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, awaiting payment.
    Pending,
    /// Payment settled at the gateway.
    Paid,
    /// Being picked and packed.
    Processing,
    /// Handed to the courier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Abandoned or rejected before fulfilment.
    Cancelled,
    /// Payment returned to the customer.
    Refunded,
}

/// A status change the rules do not allow.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot change order status from {} to {}", from.label(), to.label())]
pub struct InvalidTransition {
    /// Current status.
    pub from: OrderStatus,
    /// Requested status.
    pub to: OrderStatus,
}

/// Error for unrecognised status names.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status `{0}`")]
pub struct ParseOrderStatusError(String);

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Paid,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::Refunded,
    ];

    /// Wire name, as the backend serialises it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    /// Human-readable label for the back office.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending payment",
            Self::Paid => "Paid",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
        }
    }

    /// Statuses this one may move to.
    #[must_use]
    pub fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Paid, Self::Cancelled],
            Self::Paid => &[Self::Processing, Self::Refunded],
            Self::Processing => &[Self::Shipped, Self::Cancelled],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered => &[Self::Refunded],
            Self::Cancelled | Self::Refunded => &[],
        }
    }

    /// Whether no further transitions are allowed.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Check that moving to `to` is allowed.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidTransition`] when the move is not in the table.
    pub fn validate_transition(self, to: Self) -> Result<(), InvalidTransition> {
        if self.allowed_transitions().contains(&to) {
            Ok(())
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or(ParseOrderStatusError(normalized))
    }
}
