//! playlutris - play Windows games on Linux containers with Lutris.
//!
//! This binary launches a single preconfigured Lutris/Wine container with
//! host GPU, audio, and display access, then streams its output until the
//! container exits or the process is interrupted.

use playlutris::cli::{self, Args};
use std::io::Write;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    env_logger::Builder::new()
        .filter_level(args.log_level.to_filter())
        .format(|buf, record| writeln!(buf, "{}: {}", record.target(), record.args()))
        .init();

    let config = args.to_config();

    match cli::launch(&config).await {
        Ok(()) => {}
        Err(e) => {
            log::error!("{e}");

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                for suggestion in suggestions {
                    log::error!("  {suggestion}");
                }
            }

            process::exit(1);
        }
    }
}
