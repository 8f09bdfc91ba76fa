//! Taskledger: a small task-tracking backend.
//!
//! Users own tasks; each task's status is the latest entry of an append-only
//! history referencing a seeded status vocabulary.
//!
//! # Architecture
//!
//! Taskledger follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, memory)
//!
//! # Modules
//!
//! - [`task`]: Task domain, store port and adapters, service, and API
//! - [`config`]: Layered configuration loading
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
