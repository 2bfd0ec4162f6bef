//! Device/mountpoint identity model for the Device Registry (§4.1): stable
//! `(uuid, scheme)` identity, an ordered mountpoint history ranked by
//! last-seen, and longest-prefix-wins resolution of absolute MRLs back to a
//! device plus a device-relative MRL.

mod device;
mod fingerprint;
mod mountpoint;
mod registry;

pub use device::Device;
pub use fingerprint::DeviceFingerprint;
pub use mountpoint::{normalize_mrl, Mountpoint};
pub use registry::{DeviceKey, DeviceRegistry};
