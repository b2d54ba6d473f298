//! Implementations of the ports (HTTP scoring client and its endpoints).

pub mod endpoint;
pub mod http_scoring;

pub use self::endpoint::{AnalyzeEndpoint, SuggestEndpoint};
pub use self::http_scoring::HttpScoringClient;
