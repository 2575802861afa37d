//! Output relay for the attached container stream.
//!
//! Consumes demultiplexed output frames from the attach socket and writes
//! each payload to the terminal verbatim; the stream's own newlines are
//! preserved and none are added. The loop ends when the engine closes the
//! stream (container exit) or the process receives Ctrl-C; either way a
//! best-effort kill follows. Detached runs skip the relay entirely.

use crate::engine::Engine;
use crate::error::EngineError;
use bollard::container::LogOutput;
use bollard::errors::Error as BollardError;
use futures_util::{Stream, StreamExt};
use std::io::Write;

/// Relay the attach stream to stdout until it closes or Ctrl-C arrives,
/// then issue a best-effort kill.
///
/// A kill against an already-stopped (auto-removed) container is expected
/// and logged at debug level only.
pub async fn run_attached<S>(engine: &Engine, container_id: &str, stream: S)
where
    S: Stream<Item = Result<LogOutput, BollardError>> + Unpin,
{
    let mut stdout = std::io::stdout();
    tokio::select! {
        _ = relay_loop(stream, &mut stdout) => {
            log::debug!("Attach stream closed, container exited.");
        }
        _ = tokio::signal::ctrl_c() => {
            log::debug!("Interrupted.");
        }
    }

    log::info!("Killing container...");
    match engine.kill(container_id).await {
        Ok(()) => {}
        Err(EngineError::Gone { .. }) => {
            log::debug!("Could not kill container...not running anymore.");
        }
        Err(e) => {
            log::warn!("Failed to kill container: {e}");
        }
    }
}

/// Drain the stream, writing every frame payload to `out`.
///
/// Stream-side errors end the loop; payloads that are not valid text fall
/// back to a raw byte representation instead of terminating it.
pub async fn relay_loop<S, W>(mut stream: S, out: &mut W)
where
    S: Stream<Item = Result<LogOutput, BollardError>> + Unpin,
    W: Write,
{
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(output) => write_payload(out, output.into_bytes().as_ref()),
            Err(e) => {
                log::debug!("Attach stream error: {e}");
                break;
            }
        }
    }
}

/// Write one frame payload without inserting trailing newlines
fn write_payload<W: Write>(out: &mut W, payload: &[u8]) {
    match std::str::from_utf8(payload) {
        Ok(text) => {
            let _ = write!(out, "{text}");
        }
        Err(_) => {
            let _ = write!(out, "{}", payload.escape_ascii());
        }
    }
    let _ = out.flush();
}
