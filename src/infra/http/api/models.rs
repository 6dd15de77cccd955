//! Query-string shapes for the posts API. Request and response bodies live
//! in `plume-api-types` so clients share the exact wire contract.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}
