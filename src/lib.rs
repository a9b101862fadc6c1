//! Browser client for a two-sided creator marketplace: brands run campaigns,
//! creators apply, and both sides track contracts, deliverables and messages.

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod session;
pub mod state;
pub mod storage;
