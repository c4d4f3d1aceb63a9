//! Trading-pair explorer over STON.fi liquidity pools.
//!
//! The pipeline in [`services`] is pure: it derives pairs from already
//! fetched assets and pools, then filters, sorts and paginates them. Both the
//! HTTP server and the one-shot shell call into it.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod sources;
