//! StarTrader - procedural galaxy, market, and event simulation core
//!
//! Everything here is single-threaded, advances in discrete day steps, and
//! draws randomness from one injectable `ChaCha8Rng` stream so that seeded
//! runs replay exactly.

pub mod catalog;
pub mod core;
pub mod events;
pub mod galaxy;
pub mod market;
pub mod missions;
pub mod save;
pub mod sim;
