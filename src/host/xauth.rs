//! Xauthority token retrieval via the external `xauth` tool.
//!
//! The display server grants access per shared secret; the matching token for
//! this host is extracted from `xauth list` output and later uploaded into the
//! container. Token selection is hostname-matched: a token for some other
//! display would silently grant no access.

use crate::error::CredentialError;
use tokio::process::Command;

/// Retrieve the Xauthority token bytes for the current host.
///
/// Runs `xauth list` and picks the entry whose display name starts with this
/// machine's hostname.
///
/// # Errors
///
/// * [`CredentialError::XauthUnavailable`] - the tool could not be spawned or
///   wrote to stderr; the run continues with a degraded display
/// * [`CredentialError::XauthTokenNotFound`] - no entry matches the current
///   hostname; fatal, since the display would silently stay inaccessible
pub async fn current_host_token() -> Result<Vec<u8>, CredentialError> {
    let output = Command::new("xauth")
        .arg("list")
        .output()
        .await
        .map_err(|e| CredentialError::XauthUnavailable {
            reason: e.to_string(),
        })?;

    if !output.stderr.is_empty() {
        return Err(CredentialError::XauthUnavailable {
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let hostname = local_hostname();
    let listing = String::from_utf8_lossy(&output.stdout);
    select_token(&listing, &hostname).ok_or(CredentialError::XauthTokenNotFound { hostname })
}

/// Select the token for `hostname` from `xauth list` output.
///
/// Each line has the form `<display> <protocol> <hexkey>`; the match is on
/// the display field prefix, the token is the last whitespace-separated
/// field of the first matching line.
pub fn select_token(listing: &str, hostname: &str) -> Option<Vec<u8>> {
    listing
        .lines()
        .filter(|line| !line.trim().is_empty())
        .find(|line| {
            line.split_whitespace()
                .next()
                .is_some_and(|display| display.starts_with(hostname))
        })
        .and_then(|line| line.split_whitespace().next_back())
        .map(|token| token.as_bytes().to_vec())
}

fn local_hostname() -> String {
    nix::unistd::gethostname()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "localhost".to_string())
}
