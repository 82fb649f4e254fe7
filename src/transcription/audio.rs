//! Audio payload handed to the job client.

use std::path::Path;

use super::error::TranscriptionError;

/// Audio content plus the file name reported to the service.
///
/// Owned by the caller; the client only borrows it for the upload.
#[derive(Debug, Clone)]
pub struct AudioSource {
    file_name: String,
    data: Vec<u8>,
}

impl AudioSource {
    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    /// Reads an audio file into memory.
    ///
    /// # Errors
    /// - If the file cannot be read
    pub async fn from_path(path: &Path) -> Result<Self, TranscriptionError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| TranscriptionError::AudioUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self::from_bytes(file_name, data))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_unreadable() {
        let path = std::env::temp_dir().join("genrx-voice-missing-audio.ogg");
        let err = AudioSource::from_path(&path).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::AudioUnreadable { .. }));
    }

    #[tokio::test]
    async fn test_reads_file_name_and_bytes() {
        let path = std::env::temp_dir().join(format!(
            "genrx-voice-audio-{}.wav",
            std::process::id()
        ));
        tokio::fs::write(&path, b"RIFF").await.unwrap();

        let audio = AudioSource::from_path(&path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(audio.data(), b"RIFF");
        assert!(audio.file_name().starts_with("genrx-voice-audio-"));
        assert_eq!(audio.len(), 4);
        assert!(!audio.is_empty());
    }

    #[test]
    fn test_empty_payload() {
        let audio = AudioSource::from_bytes("silence.wav", Vec::new());
        assert!(audio.is_empty());
        assert_eq!(audio.len(), 0);
    }
}
