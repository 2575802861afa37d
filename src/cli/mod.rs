//! Command line interface and run orchestration.
//!
//! One invocation is one linear run: probe the host, connect to the engine,
//! resolve image and volume, assemble the specification, create the
//! container, inject credentials, start, and relay output unless detached.

mod args;

pub use args::{Args, LogLevel};

use crate::engine::credentials::CredentialArchive;
use crate::engine::Engine;
use crate::error::{CredentialError, Result};
use crate::host::{HostResources, probe_host, xauth};
use crate::relay;
use crate::spec::ContainerSpec;
use crate::{DisplayProtocol, LaunchConfig, PULSE_COOKIE_ENTRY, SECRET_DIR, XKEY_ENTRY};

/// Execute one launch with the given configuration.
///
/// Returns `Ok(())` when the run completed (or was started detached); any
/// fatal setup failure is propagated for `main` to report and exit 1.
pub async fn launch(config: &LaunchConfig) -> Result<()> {
    let resources = probe_host(config)?;

    let engine = Engine::connect().await?;
    engine.resolve_image(&config.image).await?;
    let home_volume = engine
        .resolve_volume(&config.volume_name, config.create_volume_if_missing)
        .await?;

    let spec = ContainerSpec::assemble(
        config,
        &resources,
        &home_volume,
        users::get_current_uid(),
        users::get_current_gid(),
    );
    let container_id = engine.create_container(&spec).await?;

    // Secrets go in after creation, before start: the upload targets the
    // container filesystem, not a mounted volume.
    inject_credentials(&engine, &container_id, config, &resources).await?;

    // Attach before starting so no early output is missed.
    let attached = if config.detach {
        None
    } else {
        Some(engine.attach(&container_id).await?)
    };

    log::info!(
        "Starting Lutris in container with id {}",
        short_id(&container_id)
    );
    engine.start(&container_id).await?;

    match attached {
        Some(results) => relay::run_attached(&engine, &container_id, results.output).await,
        None => log::info!("Leaving and not printing Lutris logs in detached mode."),
    }

    Ok(())
}

/// Inject display and audio credentials into the created container.
///
/// Upload failures and an unusable `xauth` tool degrade the feature with a
/// logged error; a token listing that has no entry for this host is fatal,
/// since an unmatched token would silently grant no display access.
async fn inject_credentials(
    engine: &Engine,
    container_id: &str,
    config: &LaunchConfig,
    resources: &HostResources,
) -> Result<()> {
    if config.display_protocol == DisplayProtocol::X11 {
        match xauth::current_host_token().await {
            Ok(token) => {
                let archive = CredentialArchive::new(XKEY_ENTRY, token);
                match archive.upload(engine, container_id, SECRET_DIR).await {
                    Ok(()) => log::info!(
                        "Xauthority token copied into container to grant display access."
                    ),
                    Err(e) => log::error!(
                        "Failed to upload xauth information into container. Display won't work: {e}"
                    ),
                }
            }
            Err(e @ CredentialError::XauthTokenNotFound { .. }) => return Err(e.into()),
            Err(e) => log::error!("{e}"),
        }
    }

    if let Some(cookie_path) = &resources.pulse_cookie {
        match std::fs::read(cookie_path) {
            Ok(cookie) => {
                let archive = CredentialArchive::new(PULSE_COOKIE_ENTRY, cookie);
                match archive.upload(engine, container_id, SECRET_DIR).await {
                    Ok(()) => log::debug!("PulseAudio cookie copied into container."),
                    Err(e) => log::warn!("Failed to upload PulseAudio cookie: {e}"),
                }
            }
            Err(e) => log::warn!(
                "Could not read PulseAudio cookie at {}: {e}",
                cookie_path.display()
            ),
        }
    }

    Ok(())
}

/// Truncated container id, the way the engine CLI displays them
fn short_id(id: &str) -> &str {
    &id[..id.len().min(12)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_truncates_long_ids() {
        let id = "0123456789abcdef0123456789abcdef";
        assert_eq!(short_id(id), "0123456789ab");
    }

    #[test]
    fn test_short_id_keeps_short_ids() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }
}
