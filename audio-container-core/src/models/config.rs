use super::error::ContainerError;

/// Limits applied while scanning a container.
///
/// The scanner never uses the outer RIFF/FORM size field as a bound. With the
/// default (unbounded) configuration it stops only at the target chunk, on an
/// unrecognized tag, or when the stream runs out. Callers reading untrusted
/// input can cap the work done here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanConfiguration {
    /// Maximum number of chunk headers visited after the 12-byte file header
    /// (None = unlimited).
    pub max_chunks: Option<usize>,

    /// Maximum `data` chunk size in bytes that will be loaded (None = unlimited).
    pub max_data_bytes: Option<u64>,
}

impl ScanConfiguration {
    pub fn validate(&self) -> Result<(), ContainerError> {
        if self.max_chunks == Some(0) {
            return Err(ContainerError::ConfigurationFailed(
                "max_chunks must be at least 1".into(),
            ));
        }
        if self.max_data_bytes == Some(0) {
            return Err(ContainerError::ConfigurationFailed(
                "max_data_bytes must be positive".into(),
            ));
        }
        Ok(())
    }
}
