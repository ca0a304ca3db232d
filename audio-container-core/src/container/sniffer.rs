use std::io::Read;

use crate::models::chunk::ChunkTag;
use crate::models::error::ContainerError;
use crate::models::format::ContainerKind;

/// Length of the outer container header: tag, size, form type.
pub const FILE_HEADER_SIZE: usize = 12;

/// Identify the container from its 12-byte file header.
///
/// ```text
/// [0-3]   outer tag   "RIFF" | "FORM"
/// [4-7]   outer size  (not used as a scan bound)
/// [8-11]  form type   "WAVE" | "AIFF"
/// ```
///
/// Consumes exactly 12 bytes on success.
pub fn sniff_container<R: Read>(reader: &mut R) -> Result<ContainerKind, ContainerError> {
    let mut header = [0u8; FILE_HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let outer = ChunkTag([header[0], header[1], header[2], header[3]]);
    let Some(kind) = ContainerKind::from_outer_tag(outer) else {
        return Err(ContainerError::InvalidChunkId { tag: outer });
    };

    let layout = kind.layout();
    let form_type = ChunkTag([header[8], header[9], header[10], header[11]]);
    if form_type != layout.form_type {
        return Err(layout.form_type_mismatch(form_type));
    }

    let outer_size = layout
        .size_order
        .u32([header[4], header[5], header[6], header[7]]);
    log::debug!("{} container, outer size {} bytes", outer, outer_size);

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn recognizes_wav() {
        let mut cursor = Cursor::new(b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec());
        assert_eq!(sniff_container(&mut cursor), Ok(ContainerKind::Wav));
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn recognizes_aiff() {
        let mut cursor = Cursor::new(b"FORM\x00\x00\x00\x2eAIFF".to_vec());
        assert_eq!(sniff_container(&mut cursor), Ok(ContainerKind::Aiff));
    }

    #[test]
    fn short_header() {
        let mut cursor = Cursor::new(b"RIFF\x00\x00".to_vec());
        assert_eq!(sniff_container(&mut cursor), Err(ContainerError::ShortRead));
    }

    #[test]
    fn unknown_outer_tag() {
        let mut cursor = Cursor::new(b"OggS\x00\x00\x00\x00WAVE".to_vec());
        let err = sniff_container(&mut cursor).unwrap_err();
        assert_eq!(err, ContainerError::InvalidChunkId { tag: ChunkTag(*b"OggS") });
        assert_eq!(err.diagnostics().unwrap().chunk_id, ChunkTag(*b"OggS"));
    }

    #[test]
    fn riff_with_wrong_form_type() {
        let mut cursor = Cursor::new(b"RIFF\x00\x00\x00\x00AVI ".to_vec());
        let err = sniff_container(&mut cursor).unwrap_err();
        assert_eq!(err, ContainerError::InvalidRiffChunkFormat { tag: ChunkTag(*b"AVI ") });
        assert_eq!(err.diagnostics().unwrap().chunk_id, ChunkTag(*b"AVI "));
    }

    #[test]
    fn form_with_wrong_form_type() {
        // AIFC is a multi-form variant and is not accepted.
        let mut cursor = Cursor::new(b"FORM\x00\x00\x00\x00AIFC".to_vec());
        let err = sniff_container(&mut cursor).unwrap_err();
        assert_eq!(err, ContainerError::InvalidFormChunkFormat { tag: ChunkTag(*b"AIFC") });
    }
}
