//! Container engine client.
//!
//! Thin wrapper around the Docker Engine API via bollard. Every operation is
//! a single call: image lookup, volume lookup/creation, container
//! create/start/kill, output attach, and archive upload. Not-found responses
//! are mapped onto dedicated [`EngineError`] variants so callers can tell
//! "resource absent" apart from "engine unreachable".

pub mod credentials;

use crate::error::EngineError;
use crate::spec::ContainerSpec;
use bollard::Docker;
use bollard::container::{
    AttachContainerOptions, AttachContainerResults, Config, CreateContainerOptions,
    KillContainerOptions, StartContainerOptions, UploadToContainerOptions,
};
use bollard::errors::Error as BollardError;
use bollard::models::{DeviceMapping, HostConfig};
use bollard::volume::CreateVolumeOptions;

/// Handle to the container engine daemon
#[derive(Debug, Clone)]
pub struct Engine {
    docker: Docker,
}

fn is_not_found(err: &BollardError) -> bool {
    matches!(
        err,
        BollardError::DockerResponseServerError {
            status_code: 404,
            ..
        }
    )
}

impl Engine {
    /// Connect to the local engine daemon and verify it answers.
    ///
    /// # Errors
    ///
    /// * [`EngineError::Unreachable`] - the daemon socket is absent, refuses
    ///   the connection, or does not answer the ping
    pub async fn connect() -> Result<Self, EngineError> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| EngineError::Unreachable { source: e })?;
        docker
            .ping()
            .await
            .map_err(|e| EngineError::Unreachable { source: e })?;
        Ok(Self { docker })
    }

    /// Resolve an image name to its id.
    ///
    /// Image pulling is out of scope: a missing image is
    /// [`EngineError::ImageNotFound`].
    pub async fn resolve_image(&self, name: &str) -> Result<String, EngineError> {
        match self.docker.inspect_image(name).await {
            Ok(image) => Ok(image.id.unwrap_or_else(|| name.to_string())),
            Err(e) if is_not_found(&e) => Err(EngineError::ImageNotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the named home volume, optionally creating it.
    ///
    /// With `create_if_missing`, an absent volume is created with local-driver
    /// defaults and the run proceeds; otherwise absence is
    /// [`EngineError::VolumeNotFound`].
    pub async fn resolve_volume(
        &self,
        name: &str,
        create_if_missing: bool,
    ) -> Result<String, EngineError> {
        match self.docker.inspect_volume(name).await {
            Ok(volume) => Ok(volume.name),
            Err(e) if is_not_found(&e) => {
                log::debug!("No existing volume found with name {name}");
                if !create_if_missing {
                    return Err(EngineError::VolumeNotFound {
                        name: name.to_string(),
                    });
                }
                log::info!("Creating volume {name} for the guest home directory.");
                let volume = self
                    .docker
                    .create_volume(CreateVolumeOptions {
                        name,
                        driver: "local",
                        ..Default::default()
                    })
                    .await?;
                Ok(volume.name)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create a container from an assembled specification.
    ///
    /// The container is created with auto-removal enabled, so the engine
    /// deletes it once it stops.
    pub async fn create_container(&self, spec: &ContainerSpec) -> Result<String, EngineError> {
        let response = self
            .docker
            .create_container(
                None::<CreateContainerOptions<String>>,
                container_config(spec),
            )
            .await?;
        for warning in &response.warnings {
            log::warn!("Engine warning: {warning}");
        }
        Ok(response.id)
    }

    /// Start a created container
    pub async fn start(&self, id: &str) -> Result<(), EngineError> {
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await?;
        Ok(())
    }

    /// Forcibly stop a container.
    ///
    /// An already-stopped (and auto-removed) container yields
    /// [`EngineError::Gone`], which cleanup paths suppress.
    pub async fn kill(&self, id: &str) -> Result<(), EngineError> {
        match self
            .docker
            .kill_container(id, None::<KillContainerOptions<String>>)
            .await
        {
            Ok(()) => Ok(()),
            Err(BollardError::DockerResponseServerError {
                status_code: 404 | 409,
                ..
            }) => Err(EngineError::Gone { id: id.to_string() }),
            Err(e) => Err(e.into()),
        }
    }

    /// Attach to a container's combined stdout/stderr stream.
    ///
    /// The stream yields demultiplexed output frames; no log replay, live
    /// output only.
    pub async fn attach(&self, id: &str) -> Result<AttachContainerResults, EngineError> {
        let results = self
            .docker
            .attach_container(
                id,
                Some(AttachContainerOptions::<String> {
                    stdout: Some(true),
                    stderr: Some(true),
                    stdin: Some(false),
                    stream: Some(true),
                    logs: Some(false),
                    detach_keys: None,
                }),
            )
            .await?;
        Ok(results)
    }

    /// Upload a tar archive into a container's filesystem at `dest_path`
    pub async fn upload_archive(
        &self,
        id: &str,
        dest_path: &str,
        archive: Vec<u8>,
    ) -> Result<(), EngineError> {
        self.docker
            .upload_to_container(
                id,
                Some(UploadToContainerOptions {
                    path: dest_path,
                    ..Default::default()
                }),
                archive.into(),
            )
            .await?;
        Ok(())
    }
}

/// Translate an assembled [`ContainerSpec`] into the engine's creation config
fn container_config(spec: &ContainerSpec) -> Config<String> {
    let binds = spec
        .volumes
        .iter()
        .map(|v| {
            let mode = if v.read_only { "ro" } else { "rw" };
            format!("{}:{}:{}", v.source, v.target, mode)
        })
        .collect();

    let devices = spec
        .devices
        .iter()
        .map(|d| DeviceMapping {
            path_on_host: Some(d.host_path.clone()),
            path_in_container: Some(d.container_path.clone()),
            cgroup_permissions: Some("rwm".to_string()),
        })
        .collect();

    let env = spec
        .env
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();

    Config {
        image: Some(spec.image.clone()),
        cmd: Some(spec.command.clone()),
        env: Some(env),
        attach_stdout: Some(true),
        attach_stderr: Some(true),
        host_config: Some(HostConfig {
            binds: Some(binds),
            devices: Some(devices),
            shm_size: Some(spec.shm_size),
            auto_remove: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}
