//! Host resource probing.
//!
//! Inspects fixed host filesystem paths (display socket directory, PulseAudio
//! socket, GPU and sound device directories, PulseAudio cookie) and records,
//! per resource, whether it can be exposed to the container. Optional
//! resources degrade to a warning; a missing display socket directory aborts
//! the run. No engine calls happen here.

pub mod xauth;

use crate::error::{HostError, Result};
use crate::{DisplayProtocol, LaunchConfig};
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

/// Host resources available for passthrough into the container.
///
/// Absent optional resources are `None` and simply produce no corresponding
/// mount, device, or environment entry in the container specification.
#[derive(Debug, Clone, Default)]
pub struct HostResources {
    /// Display server socket directory, mounted read-only
    pub display_socket_dir: Option<PathBuf>,
    /// PulseAudio server socket, mounted read-only
    pub pulse_socket: Option<PathBuf>,
    /// GPU device directory, passed through as devices
    pub gpu_device_dir: Option<PathBuf>,
    /// Sound card device directory, passed through as devices
    pub sound_device_dir: Option<PathBuf>,
    /// PulseAudio authentication cookie file, injected at start
    pub pulse_cookie: Option<PathBuf>,
    /// Display value copied from the host environment
    pub display: Option<String>,
    /// Wayland display value copied from the host environment
    pub wayland_display: Option<String>,
}

/// Probe the host for resources the container needs.
///
/// The display socket directory is load-bearing: if it is missing the probe
/// fails with [`HostError::DisplayPathMissing`] and no container is created.
/// Everything else is nice to have and degrades to a warning.
pub fn probe_host(config: &LaunchConfig) -> Result<HostResources> {
    let mut resources = HostResources::default();

    if config.display_socket_dir.is_dir() {
        log::debug!(
            "Display server found in the path: {}",
            config.display_socket_dir.display()
        );
        resources.display_socket_dir = Some(config.display_socket_dir.clone());
    } else {
        return Err(HostError::DisplayPathMissing {
            path: config.display_socket_dir.clone(),
        }
        .into());
    }

    if is_socket(&config.pulse_socket) {
        log::debug!(
            "PulseAudio socket found in the path: {}",
            config.pulse_socket.display()
        );
        resources.pulse_socket = Some(config.pulse_socket.clone());
    } else {
        log::warn!(
            "Socket for PulseAudio not found from the path '{}'. Sounds will not work.",
            config.pulse_socket.display()
        );
    }

    let gpu_path = Path::new(crate::GPU_DEVICE_DIR);
    if gpu_path.is_dir() {
        log::debug!("GPUs found from the path: {}", gpu_path.display());
        resources.gpu_device_dir = Some(gpu_path.to_path_buf());
    } else {
        log::warn!(
            "DRI path not found from: {}. GPUs might not be accessible.",
            gpu_path.display()
        );
    }

    let snd_path = Path::new(crate::SOUND_DEVICE_DIR);
    if snd_path.is_dir() {
        log::debug!("Sound cards found in path: {}", snd_path.display());
        resources.sound_device_dir = Some(snd_path.to_path_buf());
    } else {
        log::warn!(
            "No sound card devices found from the path {}",
            snd_path.display()
        );
    }

    match &config.pulse_cookie {
        Some(cookie) if cookie.is_file() => {
            log::debug!("PulseAudio cookie found in the path: {}", cookie.display());
            resources.pulse_cookie = Some(cookie.clone());
        }
        _ => {
            log::warn!("PulseAudio cookie not found. Audio authentication may fail.");
        }
    }

    match config.display_protocol {
        DisplayProtocol::X11 => {
            resources.display = std::env::var("DISPLAY").ok();
            if resources.display.is_none() {
                log::warn!("DISPLAY is not set on the host.");
            }
        }
        DisplayProtocol::Wayland => {
            resources.wayland_display = std::env::var("WAYLAND_DISPLAY").ok();
            if resources.wayland_display.is_none() {
                log::warn!("WAYLAND_DISPLAY is not set on the host.");
            }
        }
    }

    Ok(resources)
}

fn is_socket(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.file_type().is_socket())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LaunchError;
    use std::path::PathBuf;

    fn config_with_display(dir: &Path) -> LaunchConfig {
        LaunchConfig {
            display_socket_dir: dir.to_path_buf(),
            pulse_socket: PathBuf::from("/nonexistent/pulse-socket"),
            pulse_cookie: None,
            ..LaunchConfig::default()
        }
    }

    #[test]
    fn test_missing_display_dir_aborts_probe() {
        let config = config_with_display(Path::new("/nonexistent/.X11-unix"));
        let err = probe_host(&config).unwrap_err();
        assert!(matches!(
            err,
            LaunchError::Host(HostError::DisplayPathMissing { .. })
        ));
    }

    #[test]
    fn test_optional_resources_degrade_to_none() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with_display(tmp.path());
        let resources = probe_host(&config).unwrap();
        assert_eq!(resources.display_socket_dir, Some(tmp.path().to_path_buf()));
        // A plain path that is not a socket must not register as audio
        assert_eq!(resources.pulse_socket, None);
        assert_eq!(resources.pulse_cookie, None);
    }

    #[test]
    fn test_regular_file_is_not_a_socket() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not-a-socket");
        std::fs::write(&file, b"data").unwrap();
        assert!(!is_socket(&file));
        assert!(!is_socket(&tmp.path().join("missing")));
    }

    #[test]
    fn test_pulse_cookie_file_is_detected() {
        let tmp = tempfile::tempdir().unwrap();
        let cookie = tmp.path().join("cookie");
        std::fs::write(&cookie, b"\x01\x02\x03").unwrap();
        let mut config = config_with_display(tmp.path());
        config.pulse_cookie = Some(cookie.clone());
        let resources = probe_host(&config).unwrap();
        assert_eq!(resources.pulse_cookie, Some(cookie));
    }
}
