// Command line layer: flag parsing and the single pass through the
// upload pipeline (collect, authenticate, build, send, report).

use std::io::{self, Read, Write};
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::api::{GistClient, DEFAULT_API_URL};
use crate::credential::Credential;
use crate::error::GistError;
use crate::gist::GistRequest;
use crate::input::collect_files;

/// Upload files or standard input as a gist and print its URL.
#[derive(Parser, Debug, Clone)]
#[command(name = "gist", version, override_usage = "gist [options] <file>|-")]
pub struct Args {
    /// Id of an existing gist to update
    #[arg(short = 'u', long = "update", value_name = "ID")]
    pub update: Option<String>,

    /// Make the gist public
    #[arg(short = 'p', long = "public")]
    pub public: bool,

    /// Upload without credentials
    #[arg(short = 'a', long = "anonymous")]
    pub anonymous: bool,

    /// Description for the gist (defaults to the file list)
    #[arg(short = 'd', long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    /// Base URL of the gist API
    #[arg(long, env = "GISTER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Files to upload, `-` reads standard input
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<String>,
}

/// Run against the real stdin, stdout and credential sources.
pub fn run(args: &Args) -> Result<(), GistError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(args, stdin.lock(), &mut stdout.lock(), Credential::load)
}

/// Drive one upload. `load_credential` is only called when the upload is
/// not anonymous. On success the gist URL is the only thing written to
/// `out`.
pub fn run_with<R, W, F>(
    args: &Args,
    stdin: R,
    out: &mut W,
    load_credential: F,
) -> Result<(), GistError>
where
    R: Read,
    W: Write,
    F: FnOnce() -> Result<Credential, GistError>,
{
    let files = collect_files(&args.files, stdin)?;

    let credential = if args.anonymous {
        debug!("anonymous upload, skipping credentials");
        None
    } else {
        Some(load_credential()?)
    };

    let request = GistRequest::new(files, args.description.clone(), args.public, &args.files);
    let body = request.to_json()?;

    let client = GistClient::new(&args.api_url)?;
    let update = args.update.as_deref().filter(|id| !id.is_empty());

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Uploading...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let response = client.upload(update, body, credential.as_ref());
    spinner.finish_and_clear();

    let url = response?.into_url(&client.endpoint(update))?;
    writeln!(out, "{url}").map_err(|source| GistError::Io {
        path: "<stdout>".into(),
        source,
    })?;
    Ok(())
}
