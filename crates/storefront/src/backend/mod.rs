//! Backend API access
//!
//! Everything this process knows about stores, orders and shipping comes
//! from the backend API; this module is the only place that talks to it.

mod client;

pub use client::{strip_hop_by_hop, BackendClient, BackendError, BackendResponse, BackendResult};
