//! Credential injection into a created container.
//!
//! Small one-time secrets (the Xauthority token, the PulseAudio cookie) are
//! wrapped in a single-entry in-memory tar archive and uploaded straight into
//! the container's filesystem, avoiding an extra bind mount. Upload happens
//! after creation and before start, since it targets the container filesystem
//! directly rather than a mounted volume. Failures degrade the feature, never
//! the run.

use super::Engine;
use crate::error::CredentialError;
use std::time::{SystemTime, UNIX_EPOCH};

/// Permission bits for injected secrets: owner read/write only
const SECRET_MODE: u32 = 0o600;

/// A single secret wrapped in an in-memory tar archive
#[derive(Debug, Clone)]
pub struct CredentialArchive {
    entry_name: String,
    payload: Vec<u8>,
}

impl CredentialArchive {
    /// Wrap `payload` under the archive entry `entry_name`
    pub fn new(entry_name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            entry_name: entry_name.into(),
            payload,
        }
    }

    /// Name of the single archive entry
    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }

    /// Serialize into tar archive bytes.
    ///
    /// The entry carries the payload size, mode `0600`, and the current
    /// timestamp.
    pub fn into_bytes(self) -> std::io::Result<Vec<u8>> {
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_gnu();
        header.set_size(self.payload.len() as u64);
        header.set_mode(SECRET_MODE);
        header.set_mtime(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        );
        builder.append_data(&mut header, &self.entry_name, self.payload.as_slice())?;
        builder.into_inner()
    }

    /// Upload this secret into the container at `dest_path`.
    ///
    /// # Errors
    ///
    /// * [`CredentialError::UploadFailed`] - archive serialization or the
    ///   engine upload failed; callers log and proceed with the feature
    ///   degraded
    pub async fn upload(
        self,
        engine: &Engine,
        container_id: &str,
        dest_path: &str,
    ) -> Result<(), CredentialError> {
        let entry = self.entry_name.clone();
        let bytes = self.into_bytes().map_err(|e| CredentialError::UploadFailed {
            entry: entry.clone(),
            reason: e.to_string(),
        })?;
        engine
            .upload_archive(container_id, dest_path, bytes)
            .await
            .map_err(|e| CredentialError::UploadFailed {
                entry,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_single_entry(bytes: &[u8]) -> (String, u64, u32, Vec<u8>) {
        let mut archive = tar::Archive::new(bytes);
        let mut entries = archive.entries().unwrap();
        let mut entry = entries.next().unwrap().unwrap();
        let name = entry.path().unwrap().display().to_string();
        let size = entry.header().size().unwrap();
        let mode = entry.header().mode().unwrap();
        let mut payload = Vec::new();
        std::io::Read::read_to_end(&mut entry, &mut payload).unwrap();
        assert!(entries.next().is_none(), "expected exactly one entry");
        (name, size, mode, payload)
    }

    #[test]
    fn test_archive_entry_reports_payload_size_and_mode() {
        let payload = b"aabbccddeeff00112233445566778899".to_vec();
        let bytes = CredentialArchive::new(".Xkey", payload.clone())
            .into_bytes()
            .unwrap();

        let (name, size, mode, contents) = read_single_entry(&bytes);
        assert_eq!(name, ".Xkey");
        assert_eq!(size, payload.len() as u64);
        assert_eq!(mode, 0o600);
        assert_eq!(contents, payload);
    }

    #[test]
    fn test_raw_cookie_bytes_survive_archiving() {
        let payload = vec![0u8, 1, 2, 255, 254, 253];
        let bytes = CredentialArchive::new("pulse_cookie", payload.clone())
            .into_bytes()
            .unwrap();

        let (name, size, _, contents) = read_single_entry(&bytes);
        assert_eq!(name, "pulse_cookie");
        assert_eq!(size, payload.len() as u64);
        assert_eq!(contents, payload);
    }

    #[test]
    fn test_empty_payload_archives_cleanly() {
        let bytes = CredentialArchive::new(".Xkey", Vec::new())
            .into_bytes()
            .unwrap();
        let (_, size, _, contents) = read_single_entry(&bytes);
        assert_eq!(size, 0);
        assert!(contents.is_empty());
    }
}
