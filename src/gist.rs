// Request payload for the gists endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GistError;
use crate::input::default_description;

/// One named file inside a gist.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GistFile {
    pub content: String,
}

/// Body of a create or update request. `description` is left out of the
/// JSON entirely when empty, the API treats it as optional.
#[derive(Serialize, Debug)]
pub struct GistRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub public: bool,
    pub files: BTreeMap<String, GistFile>,
}

impl GistRequest {
    /// Build the request, falling back to the joined argument list when no
    /// (or an empty) description is supplied.
    pub fn new(
        files: BTreeMap<String, GistFile>,
        description: Option<String>,
        public: bool,
        paths: &[String],
    ) -> Self {
        let description = description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| default_description(paths));
        GistRequest {
            description,
            public,
            files,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, GistError> {
        serde_json::to_vec(self).map_err(GistError::Serialize)
    }
}
