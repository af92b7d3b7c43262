//! Checkout workflow.
//!
//! Turns the local cart into a backend order and hands the customer to the
//! payment gateway. The cart is only cleared once payment is known to have
//! settled; a redirect leaves the cart intact so an abandoned gateway visit
//! loses nothing.

use dink::{
    cart::{CartStore, MIN_ORDER_QTY},
    prices::minor_units,
    storage::CartStorage,
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{
    discounts::{DiscountQuote, DiscountsService},
    orders::{NewOrder, OrderLineItem, OrderRecord, OrdersService},
    payments::{PaymentInit, PaymentsService, RedirectForm},
};

/// Customer details collected on the checkout page.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address: String,
    pub delivery_preferences: Option<String>,
    pub notes: Option<String>,
    pub coupon_code: Option<String>,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("the cart is empty")]
    EmptyCart,

    #[error("minimum quantity is {MIN_ORDER_QTY} per item (product {product_id})")]
    BelowMinimumQuantity { product_id: u64 },

    #[error("enter a coupon code")]
    EmptyCouponCode,

    #[error(transparent)]
    Api(#[from] crate::api::ApiError),
}

/// How checkout concluded.
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// Payment settled during initialisation; the cart has been cleared.
    Paid {
        order: OrderRecord,
        customer_receipt_token: String,
    },
    /// The customer must complete payment on the gateway's hosted page.
    /// The cart is left intact until the payment is confirmed.
    RedirectToGateway {
        order: OrderRecord,
        form: RedirectForm,
    },
}

/// A coupon applied to the current cart.
#[derive(Debug, Clone, Copy)]
pub struct CouponQuote {
    /// Amount off the subtotal, in minor units.
    pub discount_cents: i64,

    /// Cart total after the discount, floored at zero.
    pub grand_total: Decimal,
}

/// Validate a coupon code against the current cart contents.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCouponCode`] when the trimmed code is
/// empty and [`CheckoutError::Api`] when the backend rejects the code or
/// the request fails.
pub async fn quote_coupon<S: CartStorage>(
    cart: &CartStore<S>,
    discounts: &dyn DiscountsService,
    code: &str,
) -> Result<CouponQuote, CheckoutError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(CheckoutError::EmptyCouponCode);
    }

    let total = cart.total();
    let DiscountQuote { discount_cents } = discounts
        .validate(code, minor_units(total), cart.item_count())
        .await?;

    let grand_total = (total - Decimal::new(discount_cents, 2)).max(Decimal::ZERO);

    Ok(CouponQuote {
        discount_cents,
        grand_total,
    })
}

/// Submit the cart as an order and initialise payment.
///
/// The cart is cleared only when the gateway settles immediately. On a
/// redirect, or on any error, the cart keeps its contents so the customer
/// can retry.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart,
/// [`CheckoutError::BelowMinimumQuantity`] when a restored line sits under
/// the per-item floor, and [`CheckoutError::Api`] when order creation or
/// payment initialisation fails.
pub async fn submit<S: CartStorage>(
    cart: &mut CartStore<S>,
    orders: &dyn OrdersService,
    payments: &dyn PaymentsService,
    form: CheckoutForm,
) -> Result<CheckoutOutcome, CheckoutError> {
    let lines = cart.lines();

    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if let Some(line) = lines.iter().find(|line| line.quantity < MIN_ORDER_QTY) {
        return Err(CheckoutError::BelowMinimumQuantity {
            product_id: line.product_id,
        });
    }

    let items = lines
        .iter()
        .map(|line| OrderLineItem {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();

    let coupon_code = form
        .coupon_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_owned);

    let order = orders
        .create_order(NewOrder {
            items,
            customer_name: form.customer_name,
            customer_email: form.customer_email,
            customer_phone: form.customer_phone,
            address: form.address,
            delivery_preferences: form.delivery_preferences,
            notes: form.notes,
            coupon_code,
        })
        .await?;

    match payments.init_payment(order.id).await? {
        PaymentInit::Paid {
            customer_receipt_token,
        } => {
            cart.clear();

            Ok(CheckoutOutcome::Paid {
                order,
                customer_receipt_token,
            })
        }
        PaymentInit::Redirect(form) => Ok(CheckoutOutcome::RedirectToGateway { order, form }),
    }
}

/// Outcome of polling the gateway after a redirect.
#[derive(Debug, Clone)]
pub enum PaymentConfirmation {
    /// The gateway settled; the cart has been cleared.
    Confirmed { receipt_url: String },
    /// The payment has not settled yet (or failed); the cart is intact.
    NotSettled,
}

/// Check whether a redirected payment has settled and clear the cart if so.
///
/// # Errors
///
/// Returns [`CheckoutError::Api`] when the verification request fails.
pub async fn confirm_payment<S: CartStorage>(
    cart: &mut CartStore<S>,
    payments: &dyn PaymentsService,
    tx_ref: &str,
) -> Result<PaymentConfirmation, CheckoutError> {
    let verification = payments.verify(tx_ref).await?;

    let Some(token) = verification
        .is_settled()
        .then_some(verification.customer_receipt_token)
        .flatten()
    else {
        return Ok(PaymentConfirmation::NotSettled);
    };

    cart.clear();

    Ok(PaymentConfirmation::Confirmed {
        receipt_url: payments.receipt_url(&token, true),
    })
}
