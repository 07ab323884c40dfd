// Entrypoint for the gist uploader.
// - Keeps `main` small: parse flags, hand them to `cli::run`.
// - Errors are printed once here and turned into the exit status.

use clap::Parser;
use gister::cli::{self, Args};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if let Err(e) = cli::run(&args) {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}
