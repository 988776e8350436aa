//! Route layout shared by the values API and its clients.

use serde::{Deserialize, Serialize};

/// Collection path; the trailing slash is part of the canonical route.
pub const VALUES_PATH: &str = "/api/v1/values/";

/// Item path template for axum routing.
pub const VALUE_ITEM_ROUTE: &str = "/api/v1/values/:value_id";

/// Body returned by the API root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootMessage {
    pub message: String,
}

pub const ROOT_MESSAGE: &str = "Welcome to the Life System API";
