use std::io::{self, Read};

use super::format_chunk::parse_format_body;
use super::layout::{ChunkRole, ContainerLayout};
use super::sniffer::FILE_HEADER_SIZE;
use crate::models::chunk::{padded_len, ChunkHeader, ChunkTag};
use crate::models::config::ScanConfiguration;
use crate::models::error::ContainerError;
use crate::models::format::{ContainerKind, Format};

/// Walks the chunk sequence that follows the 12-byte file header.
///
/// Each header read leads to one of three outcomes:
/// ```text
/// scanning ─┬→ skip-and-continue   (permitted chunk, body + pad skipped)
///           ├→ terminal-found      (format chunk, or data chunk on full reads)
///           └→ error               (unrecognized tag, short read, limit)
/// ```
///
/// The scanner always resumes at the end of the previous padded body. It
/// never uses the outer RIFF/FORM size as a bound: without limits in the
/// [`ScanConfiguration`] it stops only at a terminal chunk, an error, or the
/// end of the stream (`ShortRead`).
pub struct ChunkScanner<R> {
    reader: R,
    layout: &'static ContainerLayout,
    config: ScanConfiguration,
    chunks_seen: usize,
    offset: u64,
}

impl<R: Read> ChunkScanner<R> {
    /// `reader` must be positioned just past the file header.
    pub fn new(reader: R, kind: ContainerKind, config: ScanConfiguration) -> Self {
        Self {
            reader,
            layout: kind.layout(),
            config,
            chunks_seen: 0,
            offset: FILE_HEADER_SIZE as u64,
        }
    }

    /// Bytes consumed from the start of the file.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next 8-byte chunk header, converting the size to native order.
    pub fn next_chunk_header(&mut self) -> Result<ChunkHeader, ContainerError> {
        if let Some(limit) = self.config.max_chunks {
            if self.chunks_seen >= limit {
                return Err(ContainerError::ChunkLimitExceeded { limit });
            }
        }

        let mut raw = [0u8; 8];
        self.reader.read_exact(&mut raw)?;
        self.offset += 8;
        self.chunks_seen += 1;

        let tag = ChunkTag([raw[0], raw[1], raw[2], raw[3]]);
        let size = self.layout.size_order.u32([raw[4], raw[5], raw[6], raw[7]]);
        Ok(ChunkHeader { tag, size })
    }

    /// Skip a chunk body of declared `size`, including its pad byte.
    pub fn skip_body(&mut self, size: u32) -> Result<(), ContainerError> {
        self.skip_bytes(padded_len(size))
    }

    fn skip_bytes(&mut self, count: u64) -> Result<(), ContainerError> {
        let skipped = io::copy(&mut self.reader.by_ref().take(count), &mut io::sink())?;
        self.offset += skipped;
        if skipped < count {
            return Err(ContainerError::ShortRead);
        }
        Ok(())
    }

    /// Read and parse the leading field block of a format chunk.
    ///
    /// The field block is read whatever the declared size; only running out
    /// of stream is a `ShortRead`. Leaves the cursor right after the block.
    fn read_format_body(&mut self, header: &ChunkHeader) -> Result<Format, ContainerError> {
        let body_len = self.layout.format_body_len;
        let mut body = vec![0u8; body_len];
        self.reader.read_exact(&mut body)?;
        self.offset += body_len as u64;

        let format = parse_format_body(self.layout, &body);
        log::debug!(
            "{} chunk: {} Hz, {}-bit, {} channel(s)",
            header.tag,
            format.sample_rate,
            format.bit_depth,
            format.channels
        );
        Ok(format)
    }

    fn read_data_body(&mut self, header: &ChunkHeader) -> Result<Vec<u8>, ContainerError> {
        let size = header.size as u64;
        if let Some(limit) = self.config.max_data_bytes {
            if size > limit {
                return Err(ContainerError::DataLimitExceeded { size, limit });
            }
        }

        // Grow with the stream instead of trusting the declared size up front.
        let mut data = Vec::new();
        let read = self.reader.by_ref().take(size).read_to_end(&mut data)?;
        self.offset += read as u64;
        if (read as u64) < size {
            return Err(ContainerError::ShortRead);
        }
        log::debug!("data chunk: {} bytes at offset {}", size, self.offset - size);
        Ok(data)
    }

    fn skip_permitted(&mut self, header: &ChunkHeader) -> Result<(), ContainerError> {
        log::trace!("skipping {} chunk ({} bytes)", header.tag, header.size);
        self.skip_body(header.size)
    }

    /// Scan until the format chunk and parse it.
    ///
    /// A WAV `data` chunk seen first is skipped like any permitted chunk.
    pub fn scan_format(&mut self) -> Result<Format, ContainerError> {
        loop {
            let header = self.next_chunk_header()?;
            match self.layout.role_of(header.tag) {
                ChunkRole::Format => return self.read_format_body(&header),
                ChunkRole::Data | ChunkRole::Skip => self.skip_permitted(&header)?,
                ChunkRole::Unknown => return Err(ContainerError::InvalidChunkId { tag: header.tag }),
            }
        }
    }

    /// Scan for the format chunk and then the data chunk, returning the
    /// parsed format and the raw sample bytes.
    ///
    /// The data chunk is terminal, so its pad byte is not consumed.
    pub fn scan_format_and_data(&mut self) -> Result<(Format, Vec<u8>), ContainerError> {
        if self.layout.data_tag.is_none() {
            return Err(ContainerError::NotImplemented(format!(
                "{} sample data decoding",
                self.layout.form_type
            )));
        }

        let mut format = None;
        loop {
            let header = self.next_chunk_header()?;
            match self.layout.role_of(header.tag) {
                ChunkRole::Format => {
                    let parsed = self.read_format_body(&header)?;
                    // An undersized declaration resumes right after the field block.
                    let consumed = self.layout.format_body_len as u64;
                    self.skip_bytes(header.padded_size().saturating_sub(consumed))?;
                    format = Some(parsed);
                }
                ChunkRole::Data => {
                    let Some(format) = format else {
                        return Err(ContainerError::MissingFormatChunk);
                    };
                    let data = self.read_data_body(&header)?;
                    return Ok((format, data));
                }
                ChunkRole::Skip => self.skip_permitted(&header)?,
                ChunkRole::Unknown => return Err(ContainerError::InvalidChunkId { tag: header.tag }),
            }
        }
    }
}
