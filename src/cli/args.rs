//! Command line argument parsing.
//!
//! This module provides minimal CLI argument parsing. The tool is designed to
//! "just work" - run it, Lutris starts in a container.

use crate::{DisplayProtocol, LaunchConfig, PULSE_SOCKET, X_SOCKET_DIR};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Launch Lutris in a Docker container
#[derive(Parser, Debug)]
#[command(
    name = "playlutris",
    version,
    about = "Play Windows games on Linux containers with Lutris",
    long_about = "Launch a preconfigured Lutris/Wine container with host GPU, audio, and \
                  X11/Wayland display access.

Usage:
  playlutris
  playlutris -d
  playlutris --wayland /run/user/1000/wayland-0
  playlutris -l DEBUG --pulse /run/user/1000/pulse/native"
)]
pub struct Args {
    /// Set the logging level
    #[arg(short = 'l', long = "log", value_name = "LEVEL", default_value = "INFO")]
    pub log_level: LogLevel,

    /// Run detached.
    #[arg(short = 'd', long = "detach")]
    pub detach: bool,

    /// Set path for PulseAudio socket.
    #[arg(long = "pulse", value_name = "PATH", default_value = PULSE_SOCKET)]
    pub pulse: PathBuf,

    /// Set path for X socket directory.
    #[arg(long = "xorg", value_name = "PATH", conflicts_with = "wayland")]
    pub xorg: Option<PathBuf>,

    /// Set path for Wayland socket directory.
    #[arg(long = "wayland", value_name = "PATH")]
    pub wayland: Option<PathBuf>,
}

/// Logging verbosity accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    /// Everything, including per-resource probe results
    Debug,
    /// Normal progress output
    Info,
    /// Degraded resources only
    Warning,
    /// Failures only
    Error,
    /// Same as ERROR; kept for interface compatibility
    Critical,
}

impl LogLevel {
    /// Map onto the `log` crate's level filter
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the launch configuration from the parsed arguments
    pub fn to_config(&self) -> LaunchConfig {
        let (display_protocol, display_socket_dir) = match (&self.xorg, &self.wayland) {
            (_, Some(path)) => (DisplayProtocol::Wayland, path.clone()),
            (Some(path), None) => (DisplayProtocol::X11, path.clone()),
            (None, None) => (DisplayProtocol::X11, PathBuf::from(X_SOCKET_DIR)),
        };

        LaunchConfig {
            pulse_socket: self.pulse.clone(),
            display_socket_dir,
            display_protocol,
            detach: self.detach,
            ..LaunchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["playlutris"]);
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(!args.detach);

        let config = args.to_config();
        assert_eq!(config.pulse_socket, PathBuf::from("/tmp/pulse-socket"));
        assert_eq!(config.display_socket_dir, PathBuf::from("/tmp/.X11-unix"));
        assert_eq!(config.display_protocol, DisplayProtocol::X11);
    }

    #[test]
    fn test_wayland_flag_switches_protocol() {
        let args = Args::parse_from(["playlutris", "--wayland", "/run/user/1000/wayland-0"]);
        let config = args.to_config();
        assert_eq!(config.display_protocol, DisplayProtocol::Wayland);
        assert_eq!(
            config.display_socket_dir,
            PathBuf::from("/run/user/1000/wayland-0")
        );
    }

    #[test]
    fn test_xorg_and_wayland_conflict() {
        let result = Args::try_parse_from([
            "playlutris",
            "--xorg",
            "/tmp/.X11-unix",
            "--wayland",
            "/run/user/1000/wayland-0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_parsing_is_uppercase() {
        let args = Args::parse_from(["playlutris", "-l", "DEBUG"]);
        assert_eq!(args.log_level, LogLevel::Debug);
        assert_eq!(args.log_level.to_filter(), log::LevelFilter::Debug);

        let critical = Args::parse_from(["playlutris", "--log", "CRITICAL"]);
        assert_eq!(critical.log_level.to_filter(), log::LevelFilter::Error);

        assert!(Args::try_parse_from(["playlutris", "-l", "debug"]).is_err());
    }

    #[test]
    fn test_detach_flag() {
        let args = Args::parse_from(["playlutris", "-d"]);
        assert!(args.detach);
        assert!(args.to_config().detach);
    }
}
