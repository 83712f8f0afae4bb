//! Client for the Virgin Media Hub 6 cable modem REST API.
//!
//! - [`model`] - Records for the downstream, upstream, service flow and state documents
//! - [`decode`] - Strict-then-lenient JSON decoding
//! - [`client`] - [`Hub6Client`], one GET per resource
//! - [`error`] - [`FetchError`]

pub mod client;
pub mod decode;
pub mod error;
pub mod model;

pub use client::{DEFAULT_TIMEOUT, Hub6Client};
pub use decode::{DecodePass, Decoded, decode};
pub use error::{FetchError, FetchErrorKind, Result};
pub use model::{
    CableModem, Downstream, DownstreamChannel, Resource, ServiceFlow, ServiceFlows, State,
    Upstream, UpstreamChannel,
};
