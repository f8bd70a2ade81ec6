//! Tariff rate window resolution engine for hotel room pricing.
//!
//! This crate resolves a room's nightly rate from its base tariff and a set
//! of configured rate windows (seasonal surcharges, weekend and corporate
//! discounts, long-stay promotions) and exposes the engine over HTTP to
//! point-of-sale staff.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
