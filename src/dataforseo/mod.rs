pub mod client;
pub mod format;

pub use client::{get_result, parse_response, DataForSeoClient, DOMAIN_METRICS_ENDPOINT};
pub use format::format_count;
