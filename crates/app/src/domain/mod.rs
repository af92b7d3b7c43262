//! Storefront Domain Concerns

pub mod catalog;
pub mod discounts;
pub mod messages;
pub mod orders;
pub mod payments;
