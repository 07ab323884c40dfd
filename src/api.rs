// API client module: a small blocking HTTP client that posts gists to
// the hosting API and classifies the JSON it gets back.

use std::fmt;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde_json::{Map, Value};

use crate::credential::Credential;
use crate::error::GistError;

/// Public API used when `--api-url` / `GISTER_API_URL` is not given.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The API rejects requests without a recognizable user agent.
pub const USER_AGENT_VALUE: &str = concat!("gister/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// Holds a reqwest blocking client and the base URL of the API.
#[derive(Clone)]
pub struct GistClient {
    client: Client,
    base_url: String,
}

/// One `field: detail` pair out of the response's `errors` list. `index`
/// is the position of the containing object in that list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub index: usize,
    pub field: String,
    pub detail: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.index, self.field, self.detail)
    }
}

/// Decoded response: the gist URL, or whatever the API said went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GistResponse {
    Created { url: String },
    Failed { message: String, errors: Vec<FieldError> },
}

impl GistResponse {
    /// Decode a response body. Anything other than a JSON object is a
    /// protocol error; an object is a success iff it carries `html_url`.
    pub fn decode(body: &[u8]) -> Result<Self, GistError> {
        let obj: Map<String, Value> = serde_json::from_slice(body).map_err(GistError::Protocol)?;
        Ok(Self::classify(obj))
    }

    fn classify(mut obj: Map<String, Value>) -> Self {
        if let Some(url) = obj.remove("html_url") {
            return GistResponse::Created { url: text(url) };
        }

        let message = obj
            .remove("message")
            .map(text)
            .unwrap_or_else(|| "unknown error".into());

        let mut errors = Vec::new();
        if let Some(Value::Array(items)) = obj.remove("errors") {
            for (index, item) in items.into_iter().enumerate() {
                if let Value::Object(fields) = item {
                    for (field, detail) in fields {
                        errors.push(FieldError {
                            index,
                            field,
                            detail: text(detail),
                        });
                    }
                }
            }
        }
        GistResponse::Failed { message, errors }
    }

    /// Turn a failure into `GistError::Api`, naming the endpoint that
    /// was hit.
    pub fn into_url(self, endpoint: &str) -> Result<String, GistError> {
        match self {
            GistResponse::Created { url } => Ok(url),
            GistResponse::Failed { message, errors } => Err(GistError::Api {
                message,
                url: endpoint.to_string(),
                errors,
            }),
        }
    }
}

// Strings are shown bare, everything else as compact JSON.
fn text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl GistClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, GistError> {
        let client = Client::builder().build()?;
        Ok(GistClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `<base>/gists` for a new gist, `<base>/gists/<id>` for an update.
    pub fn endpoint(&self, update: Option<&str>) -> String {
        match update {
            Some(id) => format!("{}/gists/{}", self.base_url, id),
            None => format!("{}/gists", self.base_url),
        }
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }

    /// POST an already encoded request body and decode the reply. The
    /// HTTP status is only logged, the body decides success.
    pub fn upload(
        &self,
        update: Option<&str>,
        body: Vec<u8>,
        credential: Option<&Credential>,
    ) -> Result<GistResponse, GistError> {
        let url = self.endpoint(update);
        debug!("posting {} bytes to {url}", body.len());

        let mut req = self.client.post(&url).headers(Self::headers()).body(body);
        if let Some(cred) = credential {
            req = req.basic_auth(&cred.username, Some(&cred.secret));
        }

        let res = req.send()?;
        debug!("response status: {}", res.status());
        let bytes = res.bytes()?;
        GistResponse::decode(&bytes)
    }
}
