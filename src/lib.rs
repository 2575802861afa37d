//! # playlutris
//!
//! Play Windows games on Linux containers with Lutris.
//!
//! This crate launches a single Docker container preconfigured to run a
//! Wine/Lutris gaming environment with host GPU, audio, and X11/Wayland
//! display access. One invocation is one linear run: probe host resources,
//! build the container specification, create the container, inject display
//! and audio credentials, start it, and relay its output until it exits.
//!
//! ## Features
//!
//! - **Host probing**: display socket, PulseAudio socket, and GPU/sound
//!   device nodes are detected and passed through; optional resources degrade
//!   to a warning instead of failing the run
//! - **Credential injection**: the Xauthority token and PulseAudio cookie are
//!   uploaded into the created container as an in-memory tar archive, no
//!   extra bind mounts for one-time secrets
//! - **Persistent home**: the Wine prefix lives in a named volume that
//!   survives across runs and is created on first use
//! - **Attached or detached**: stream Lutris output to the terminal, or
//!   leave the container running on its own with `--detach`
//!
//! ## Usage
//!
//! ```bash
//! playlutris                      # attach and play
//! playlutris -d                   # start detached
//! playlutris --wayland /run/user/1000/wayland-0
//! playlutris -l DEBUG --pulse /run/user/1000/pulse/native
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod engine;
pub mod error;
pub mod host;
pub mod relay;
pub mod spec;

// Re-export main types for public API
pub use cli::Args;
pub use engine::{Engine, credentials::CredentialArchive};
pub use error::{CredentialError, EngineError, HostError, LaunchError, Result};
pub use host::{HostResources, probe_host};
pub use spec::ContainerSpec;

use std::path::PathBuf;

/// Default image the container is created from
pub const DEFAULT_IMAGE: &str = "lutris-vulkan";

/// Named volume holding the Wine prefix and guest home directory
pub const VOLUME_NAME: &str = "winehome";

/// Guest home directory the volume is mounted at
pub const GUEST_HOME: &str = "/home/wineuser";

/// Lutris launcher path relative to the guest home
pub const LUTRIS_RELATIVE_PATH: &str = "lutris/bin/lutris";

/// Default PulseAudio server socket path on the host
pub const PULSE_SOCKET: &str = "/tmp/pulse-socket";

/// Default X11 socket directory on the host
pub const X_SOCKET_DIR: &str = "/tmp/.X11-unix";

/// Shared memory size for the container (4 GiB)
pub const SHM_SIZE: i64 = 4 * 1024 * 1024 * 1024;

/// In-container directory secrets are dropped into
pub const SECRET_DIR: &str = "/root/";

/// Archive entry name for the Xauthority token
pub const XKEY_ENTRY: &str = ".Xkey";

/// Archive entry name for the PulseAudio cookie
pub const PULSE_COOKIE_ENTRY: &str = "pulse_cookie";

/// Host directory holding direct-rendering GPU device nodes
pub const GPU_DEVICE_DIR: &str = "/dev/dri";

/// Host directory holding sound card device nodes
pub const SOUND_DEVICE_DIR: &str = "/dev/snd";

/// Display server protocol the container session targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayProtocol {
    /// X11; forwards `DISPLAY` and the Xauthority token
    X11,
    /// Wayland; forwards `WAYLAND_DISPLAY`
    Wayland,
}

impl DisplayProtocol {
    /// Session type string exposed to the container as `XDG_SESSION_TYPE`
    pub fn session_type(&self) -> &'static str {
        match self {
            DisplayProtocol::X11 => "x11",
            DisplayProtocol::Wayland => "wayland",
        }
    }
}

/// Configuration for one container launch.
///
/// Built once from CLI arguments and defaults, then passed read-only through
/// probing, spec building, and engine calls. No ambient globals.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Image the container is created from
    pub image: String,
    /// Named volume for the guest home directory
    pub volume_name: String,
    /// Guest home directory inside the container
    pub guest_home: String,
    /// Lutris launcher path relative to the guest home
    pub lutris_relative_path: String,
    /// Shared memory size in bytes
    pub shm_size: i64,
    /// Host path of the PulseAudio server socket
    pub pulse_socket: PathBuf,
    /// Host path of the display server socket directory
    pub display_socket_dir: PathBuf,
    /// Display protocol for the session
    pub display_protocol: DisplayProtocol,
    /// Host path of the PulseAudio authentication cookie
    pub pulse_cookie: Option<PathBuf>,
    /// Do not attach to the container output stream
    pub detach: bool,
    /// Create the home volume when it does not exist.
    ///
    /// When false a missing volume aborts the run instead.
    pub create_volume_if_missing: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            volume_name: VOLUME_NAME.to_string(),
            guest_home: GUEST_HOME.to_string(),
            lutris_relative_path: LUTRIS_RELATIVE_PATH.to_string(),
            shm_size: SHM_SIZE,
            pulse_socket: PathBuf::from(PULSE_SOCKET),
            display_socket_dir: PathBuf::from(X_SOCKET_DIR),
            display_protocol: DisplayProtocol::X11,
            pulse_cookie: dirs::home_dir().map(|home| home.join(".config/pulse/cookie")),
            detach: false,
            create_volume_if_missing: true,
        }
    }
}

impl LaunchConfig {
    /// Full in-container path of the Lutris launcher
    pub fn lutris_command(&self) -> Vec<String> {
        vec![
            format!("{}/{}", self.guest_home, self.lutris_relative_path),
            // Lutris runs in debug mode so the relay has output to show
            "-d".to_string(),
        ]
    }
}
