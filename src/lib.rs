// Library root
// -----------
// The `gist` binary is a thin wrapper around these modules; each one owns
// a single step of the upload.
//
// Module responsibilities:
// - `input`: reads the file arguments (or stdin) into named entries.
// - `credential`: finds the `username:token` pair for basic auth.
// - `gist`: the request payload and its JSON encoding.
// - `api`: the HTTP call and classification of the response.
// - `cli`: flag parsing and the driver that runs the steps in order.
// - `error`: the error type every step returns.
pub mod api;
pub mod cli;
pub mod credential;
pub mod error;
pub mod gist;
pub mod input;

pub use error::GistError;
