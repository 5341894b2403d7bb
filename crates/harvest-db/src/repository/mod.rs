//! # Repository Module
//!
//! One repository per collection; SQL lives only here.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreBackend call               Repository                            │
//! │  ─────────────────               ──────────                            │
//! │  select_items / insert_item  ──► ItemRepository   (items)              │
//! │  update_item / delete_item                                              │
//! │                                                                         │
//! │  select_orders / insert_order──► OrderRepository  (orders,             │
//! │  update_order_status                                order_lines)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Timestamps
//! Stored as RFC 3339 text with exactly six fractional digits in UTC, so
//! `ORDER BY created_at DESC` is chronological. Values are truncated to
//! microseconds before they are written, and the returned rows carry the
//! truncated value, so a row read back compares equal to the one returned
//! by the insert.

pub mod item;
pub mod order;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

pub(crate) fn stored_timestamp(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

pub(crate) fn encode_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
