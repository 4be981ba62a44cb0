//! Synchronous API client core for the pet store.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps a local list of
//! pets in step with the remote store on top of that.
//!
//! # Design
//! - `PetClient` is stateless; it holds only the resource endpoint.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `Transport` executes one round trip; `StoreClient` joins the three.
//! - `Synchronizer` owns the canonical list, its filtered view and the
//!   create/edit form, and applies store results to them.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod store;
pub mod sync;
pub mod transport;
pub mod types;

pub use client::PetClient;
pub use config::StoreConfig;
pub use error::{ApiError, SyncError};
pub use form::{FormMode, PetForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{filter, PetList};
pub use store::StoreClient;
pub use sync::{Diagnostic, Synchronizer};
pub use transport::{Transport, UreqTransport};
pub use types::{Gender, Pet};
