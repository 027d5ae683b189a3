//! Confluence REST API client: configuration, route tables, request
//! building, transport and response normalization.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod path;
pub mod request;
pub mod resources;
pub mod response;
pub mod route;
pub mod transport;

pub use client::{ClientContext, ConfluenceClient, create_client};
pub use config::{ClientConfig, Credentials, Mimetypes, ProxyConfig, TransportOptions};
pub use error::{ApiError, Result};
pub use request::{FilePart, FileSource, Multipart, PreparedRequest, Query, RequestArgs, RequestBody};
pub use response::{RawResponse, TransportFailure, from_data, normalize};
pub use route::{HttpMethod, Route, all_routes, find_route};
pub use transport::{ReqwestTransport, Transport};
