//! Shared storefront client modules: the backend API connection, domain
//! service clients, the checkout flow, and file-backed cart storage.

pub mod api;
pub mod checkout;
pub mod context;
pub mod domain;
pub mod storage;
