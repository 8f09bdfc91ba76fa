//! Task tracking.
//!
//! Tasks belong to exactly one owner. Lookups, updates, and deletes filter on
//! owner and identifier together, so another user's task behaves exactly like
//! a missing one. Status changes append to a history log instead of
//! overwriting a column; the newest entry is the current status.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Transport-agnostic handlers in [`api`]

pub mod adapters;
pub mod api;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
