//! # Abridge
//!
//! A terminal form that sends text to a remote summarisation service and
//! shows the returned summary.
//!
//! ## Features
//!
//! - **Local validation**: empty and out-of-range input never reaches the network
//! - **Single in-flight request**: results of superseded or cancelled requests are discarded
//! - **Configurable endpoint**: base URL from `abridge.toml` or `ABRIDGE_BASE_URL`

pub mod client;
pub mod config;
pub mod form;
pub mod logging;
pub mod runner;
pub mod summary;
pub mod ui;
pub mod validate;
pub mod view_model;

pub use client::{HttpSummaryService, SummarizeError, SummaryService};
pub use config::Config;
pub use form::{update, Effect, FormState, Msg, RequestId};
pub use validate::{validate, TextLimits, ValidationError};
pub use view_model::{FormView, Outcome};
