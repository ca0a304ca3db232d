use std::fs::{self, File};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::container::layout::WAV_LAYOUT;
use crate::models::error::ContainerError;
use crate::models::format::Format;
use crate::processing::sample_codec;
use crate::storage::wav_writer::{self, DATA_SIZE_OFFSET, RIFF_SIZE_OFFSET, WAV_HEADER_SIZE};

/// Incremental WAV file writer.
///
/// `create` writes the 44-byte header with zero size fields, `write_samples`
/// appends encoded blocks, and `finalize` writes the pad byte and patches the
/// RIFF size (offset 4) and data size (offset 40).
///
/// ```text
/// [44-byte WAV header, sizes patched on finalize]
/// [encoded samples...]
/// [pad byte if the data size is odd]
/// ```
///
/// A writer dropped without `finalize` leaves a file whose size fields read
/// as zero.
pub struct StreamingWavWriter {
    file_path: PathBuf,
    format: Format,
    file: Option<BufWriter<File>>,
    data_bytes: u64,
    scratch: Vec<u8>,
}

impl StreamingWavWriter {
    /// Create the file (and its parent directory) and write the header.
    pub fn create(file_path: impl Into<PathBuf>, format: Format) -> Result<Self, ContainerError> {
        let file_path = file_path.into();
        wav_writer::check_writable(&format)?;

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ContainerError::Io(format!("failed to create directory: {}", e)))?;
        }

        let file = File::create(&file_path)
            .map_err(|e| ContainerError::Io(format!("failed to create file: {}", e)))?;
        let mut file = BufWriter::new(file);
        file.write_all(&wav_writer::generate_wav_header(&format, 0))?;

        Ok(Self {
            file_path,
            format,
            file: Some(file),
            data_bytes: 0,
            scratch: Vec::new(),
        })
    }

    /// Encode and append interleaved samples.
    ///
    /// Fails with `AudioDataTooLarge` before writing anything if the data
    /// chunk would outgrow its 32-bit size field.
    pub fn write_samples(&mut self, samples: &[f32]) -> Result<(), ContainerError> {
        let file = self.file.as_mut().ok_or(ContainerError::WriterClosed)?;

        let added = samples.len() as u64 * self.format.bytes_per_sample() as u64;
        wav_writer::data_chunk_size(self.data_bytes + added)?;

        self.scratch.clear();
        sample_codec::encode_into(samples, self.format.bit_depth, &mut self.scratch)?;
        file.write_all(&self.scratch)?;
        self.data_bytes += added;
        Ok(())
    }

    /// Write the pad byte, patch the size fields and close the file.
    ///
    /// Returns the total file size in bytes.
    pub fn finalize(&mut self) -> Result<u64, ContainerError> {
        let mut file = self.file.take().ok_or(ContainerError::WriterClosed)?;
        let data_size = wav_writer::data_chunk_size(self.data_bytes)?;

        if data_size & 1 == 1 {
            file.write_all(&[0])?;
        }

        let order = WAV_LAYOUT.size_order;
        file.seek(SeekFrom::Start(RIFF_SIZE_OFFSET))?;
        file.write_all(&order.u32_bytes(wav_writer::riff_size(data_size)))?;
        file.seek(SeekFrom::Start(DATA_SIZE_OFFSET))?;
        file.write_all(&order.u32_bytes(data_size))?;
        file.flush()?;

        let total = WAV_HEADER_SIZE as u64 + self.data_bytes + (self.data_bytes & 1);
        log::debug!("finalized {} ({} bytes)", self.file_path.display(), total);
        Ok(total)
    }

    /// Sample bytes written so far, excluding header and pad.
    pub fn data_bytes(&self) -> u64 {
        self.data_bytes
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for StreamingWavWriter {
    fn drop(&mut self) {
        if self.file.is_some() {
            log::warn!("{} dropped without finalize", self.file_path.display());
        }
    }
}
