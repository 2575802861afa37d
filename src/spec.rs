//! Container specification assembly.
//!
//! Pure accumulation of environment, volume, and device mappings from the
//! host probe findings plus fixed launch values. No engine calls and no
//! revalidation of host paths; a missing optional resource simply means its
//! corresponding entry is absent. The finished spec is immutable and consumed
//! exactly once by container creation.

use crate::host::HostResources;
use crate::{DisplayProtocol, LaunchConfig};
use std::collections::BTreeMap;

/// A host path or named volume exposed inside the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMapping {
    /// Host path or volume name
    pub source: String,
    /// Mount path inside the container
    pub target: String,
    /// Mounted read-only
    pub read_only: bool,
}

/// A host device node exposed inside the container's device namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMapping {
    /// Device path on the host
    pub host_path: String,
    /// Device path inside the container
    pub container_path: String,
}

/// Everything container creation needs, assembled once.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    /// Image the container is created from
    pub image: String,
    /// Startup command
    pub command: Vec<String>,
    /// Environment mapping
    pub env: BTreeMap<String, String>,
    /// Volume and bind mounts
    pub volumes: Vec<VolumeMapping>,
    /// Device passthrough list
    pub devices: Vec<DeviceMapping>,
    /// Shared memory size in bytes
    pub shm_size: i64,
}

impl ContainerSpec {
    /// Assemble the container specification.
    ///
    /// `home_volume` is the resolved name of the persistent guest home
    /// volume; `uid`/`gid` are the host's numeric user and group ids, exposed
    /// so the container entrypoint can align file ownership with the host.
    pub fn assemble(
        config: &LaunchConfig,
        resources: &HostResources,
        home_volume: &str,
        uid: u32,
        gid: u32,
    ) -> Self {
        let mut env = BTreeMap::new();
        env.insert("XDG_RUNTIME_DIR".to_string(), "/tmp".to_string());
        env.insert(
            "XDG_SESSION_TYPE".to_string(),
            config.display_protocol.session_type().to_string(),
        );
        env.insert("HOST_UID".to_string(), uid.to_string());
        env.insert("HOST_GID".to_string(), gid.to_string());
        match config.display_protocol {
            DisplayProtocol::X11 => {
                if let Some(display) = &resources.display {
                    env.insert("DISPLAY".to_string(), display.clone());
                }
            }
            DisplayProtocol::Wayland => {
                if let Some(display) = &resources.wayland_display {
                    env.insert("WAYLAND_DISPLAY".to_string(), display.clone());
                }
            }
        }

        let mut volumes = Vec::new();
        if let Some(dir) = &resources.display_socket_dir {
            volumes.push(VolumeMapping {
                source: dir.display().to_string(),
                target: dir.display().to_string(),
                read_only: true,
            });
        }
        if let Some(socket) = &resources.pulse_socket {
            volumes.push(VolumeMapping {
                source: socket.display().to_string(),
                target: socket.display().to_string(),
                read_only: true,
            });
        }
        volumes.push(VolumeMapping {
            source: home_volume.to_string(),
            target: config.guest_home.clone(),
            read_only: false,
        });

        let mut devices = Vec::new();
        for dir in [&resources.gpu_device_dir, &resources.sound_device_dir]
            .into_iter()
            .flatten()
        {
            devices.push(DeviceMapping {
                host_path: dir.display().to_string(),
                container_path: dir.display().to_string(),
            });
        }

        log::info!("Following volume(s) exposed from the host:");
        for volume in &volumes {
            log::info!("{}", volume.source);
        }

        Self {
            image: config.image.clone(),
            command: config.lutris_command(),
            env,
            volumes,
            devices,
            shm_size: config.shm_size,
        }
    }
}
