use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::container::scanner::ChunkScanner;
use crate::container::sniffer::sniff_container;
use crate::models::config::ScanConfiguration;
use crate::models::error::ContainerError;
use crate::models::format::{AudioBuffer, Format};
use crate::processing::sample_codec;

/// Reads WAV and AIFF containers under a [`ScanConfiguration`].
///
/// Each call opens its own stream; a reader holds no per-file state and can
/// be reused.
#[derive(Debug, Clone, Default)]
pub struct ContainerReader {
    config: ScanConfiguration,
}

impl ContainerReader {
    pub fn new(config: ScanConfiguration) -> Result<Self, ContainerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfiguration {
        &self.config
    }

    /// Read the channel count, sample rate and bit depth of a WAV or AIFF file.
    pub fn read_format(&self, path: &Path) -> Result<Format, ContainerError> {
        self.read_format_from(open(path)?)
    }

    /// Read the format and decode all samples of a WAV file.
    ///
    /// AIFF sample data is not decoded: AIFF input fails with `NotImplemented`
    /// once the container has been identified.
    pub fn read_all(&self, path: &Path) -> Result<AudioBuffer, ContainerError> {
        self.read_all_from(open(path)?)
    }

    pub fn read_format_from<R: Read>(&self, mut reader: R) -> Result<Format, ContainerError> {
        let kind = sniff_container(&mut reader)?;
        ChunkScanner::new(reader, kind, self.config.clone()).scan_format()
    }

    pub fn read_all_from<R: Read>(&self, mut reader: R) -> Result<AudioBuffer, ContainerError> {
        let kind = sniff_container(&mut reader)?;
        let (format, data) = ChunkScanner::new(reader, kind, self.config.clone()).scan_format_and_data()?;
        let samples = sample_codec::decode(&data, format.bit_depth, format.channels)?;
        Ok(AudioBuffer::new(format, samples))
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ContainerError> {
    let file = File::open(path)
        .map_err(|e| ContainerError::Io(format!("failed to open {}: {}", path.display(), e)))?;
    Ok(BufReader::new(file))
}

/// Read the format of the file at `path` with no scan limits.
pub fn read_format(path: impl AsRef<Path>) -> Result<Format, ContainerError> {
    ContainerReader::default().read_format(path.as_ref())
}

/// Read and decode the WAV file at `path` with no scan limits.
pub fn read_all(path: impl AsRef<Path>) -> Result<AudioBuffer, ContainerError> {
    ContainerReader::default().read_all(path.as_ref())
}
