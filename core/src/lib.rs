//! Data-access client and screen state for the employee admin front end.
//!
//! # Overview
//! `EmployeeClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A `Transport`
//! performs the round trip, and `EmployeeService` ties the two together
//! behind the `EmployeeApi` trait. The `view` module holds the per-screen
//! request/result state machines that drive every user action.
//!
//! # Design
//! - `EmployeeClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and testable with canned responses.
//! - Views depend on `EmployeeApi`, never on a concrete transport.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod route;
pub mod service;
pub mod transport;
pub mod types;
pub mod view;

#[cfg(test)]
mod fake;

pub use client::EmployeeClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use route::Route;
pub use service::{EmployeeApi, EmployeeService};
pub use transport::{Transport, UreqTransport};
pub use types::{normalize_hire_date, Employee, EmployeeId};
pub use view::{Phase, Settled, Ticket, ViewError};
