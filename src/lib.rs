//! qrpulse: analytics backend for QR marketing campaigns.
//!
//! Records QR scans, coupon clicks, and reviews into a single JSON document,
//! derives the dashboard views from it on every read, and runs random
//! winner draws for reward campaigns.

pub mod aggregation;
pub mod clock;
pub mod config;
pub mod http;
pub mod model;
pub mod services;
pub mod storage;
pub mod utils;
