//! Client core for the todo service.
//!
//! # Overview
//! Loads the todo list from a remote HTTP service, lets a user create,
//! toggle and delete items, and keeps a local view model in line with what
//! the server has confirmed. Nothing is applied optimistically: the store
//! only changes after a successful response.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest`s and parses `HttpResponse`s; a
//!   `Transport` executes them. The default transport is reqwest.
//! - `ViewModelStore` holds the list, the loading flag and the current error
//!   message. Only `SyncController` writes to it.
//! - `SyncController` runs the four remote operations and reconciles their
//!   results into the store.
//! - `presentation` is a thin terminal front end used by the binary.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod presentation;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use controller::SyncController;
pub use error::{ApiError, SyncError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{ViewModelStore, ViewState};
pub use transport::{ReqwestTransport, Transport};
pub use types::{validate_title, TitleError, Todo, TodoId, TodoPayload, MAX_TITLE_CHARS};
