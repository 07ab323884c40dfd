// Error type shared by every stage of the upload. Each variant maps to
// one kind of failure the user can hit; all of them end the process.

use std::path::PathBuf;

use crate::api::FieldError;

/// Exit status used when the command line is missing its inputs. Matches
/// what clap uses for its own usage errors.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Exit status for every other fatal error, including API-reported ones.
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum GistError {
    #[error("no input file(s), or standard input specified")]
    Usage,

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Config(String),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response is not a JSON object: {0}")]
    Protocol(#[source] serde_json::Error),

    #[error("encoding request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{message} (url: {url}){}", render_field_errors(.errors))]
    Api {
        message: String,
        url: String,
        errors: Vec<FieldError>,
    },
}

impl GistError {
    pub fn exit_code(&self) -> i32 {
        match self {
            GistError::Usage => USAGE_EXIT_CODE,
            _ => FAILURE_EXIT_CODE,
        }
    }
}

fn render_field_errors(errors: &[FieldError]) -> String {
    errors.iter().map(|e| format!("\n{e}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_is_distinct_from_other_failures() {
        assert_eq!(GistError::Usage.exit_code(), 2);
        assert_eq!(GistError::Config("bad".into()).exit_code(), 1);
        let api = GistError::Api {
            message: "Bad credentials".into(),
            url: "https://api.github.com/gists".into(),
            errors: vec![],
        };
        assert_eq!(api.exit_code(), 1);
    }

    #[test]
    fn api_error_lists_field_errors_one_per_line() {
        let err = GistError::Api {
            message: "Validation Failed".into(),
            url: "https://api.github.com/gists".into(),
            errors: vec![
                FieldError {
                    index: 0,
                    field: "code".into(),
                    detail: "missing_field".into(),
                },
                FieldError {
                    index: 1,
                    field: "field".into(),
                    detail: "files".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Validation Failed (url: https://api.github.com/gists)\n0 code: missing_field\n1 field: files"
        );
    }
}
