//! Task records and their persistence.
//!
//! This module owns everything about a single task: the domain record and
//! its boundary encodings, the store and change-feed ports of the hosted
//! backend, their adapters, and the form and dashboard services. It follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
