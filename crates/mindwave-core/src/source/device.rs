use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use super::stream::{DEFAULT_CHUNK_SIZE, StreamByteSource};
use super::{ByteSource, SourceError};

/// Source backed by a path that is opened on `connect`.
///
/// On Linux a paired headset shows up as an RFCOMM serial node
/// (e.g. `/dev/rfcomm0`); a recorded byte capture works the same way.
pub struct DeviceSource {
    path: PathBuf,
    chunk_size: usize,
    stream: Option<StreamByteSource<File>>,
}

impl DeviceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(path: impl Into<PathBuf>, chunk_size: usize) -> Self {
        Self {
            path: path.into(),
            chunk_size,
            stream: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn stream(&mut self) -> Result<&mut StreamByteSource<File>, SourceError> {
        self.stream.as_mut().ok_or(SourceError::NotConnected)
    }
}

impl ByteSource for DeviceSource {
    fn connect(&mut self) -> Result<(), SourceError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let file = File::open(&self.path)?;
        info!(path = %self.path.display(), "connected to byte source");
        self.stream = Some(StreamByteSource::with_chunk_size(file, self.chunk_size));
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, SourceError> {
        self.stream()?.read_byte()
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SourceError> {
        self.stream()?.read_bytes(count)
    }

    fn discard_consumed(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            stream.discard_consumed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteSource, DeviceSource, SourceError};

    #[test]
    fn read_before_connect_fails() {
        let mut source = DeviceSource::new("/nonexistent/rfcomm0");
        assert!(!source.is_connected());
        let err = source.read_byte().unwrap_err();
        assert!(matches!(err, SourceError::NotConnected));
    }

    #[test]
    fn connect_to_missing_path_is_io_error() {
        let mut source = DeviceSource::new("/nonexistent/rfcomm0");
        let err = source.connect().unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
