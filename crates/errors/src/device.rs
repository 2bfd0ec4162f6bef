use thiserror::Error;

/// Failure modes of the Device Registry (§4.1).
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no device registered for uuid {uuid} scheme {scheme}")]
    UnknownDevice { uuid: String, scheme: String },

    #[error("device {uuid} ({scheme}) is not currently mounted")]
    DeviceRemoved { uuid: String, scheme: String },

    #[error("mrl {0} does not match any known mountpoint")]
    NoMatchingMountpoint(String),

    #[error("invalid mrl: {0}")]
    InvalidMrl(String),
}
