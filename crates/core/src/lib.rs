//! Dink
//!
//! Client-side storefront engine for the Dink sportswear shop: the cart
//! store and its persistence port, add-time product snapshots, money
//! helpers, and the order-status rules shared by the storefront and the
//! back office.

pub mod cart;
pub mod orders;
pub mod prices;
pub mod products;
pub mod storage;
