use std::fmt;
use uuid::Uuid;

/// A display/debug identity derived from a device's durable attributes,
/// grounded on `Volume::fingerprint()`'s blake3 composition in the teacher
/// codebase. Unlike the teacher's volume fingerprint (used as the primary
/// key when no stable uuid exists) this is informational only — §4.1 makes
/// `(uuid, scheme)` the identity of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceFingerprint([u8; 32]);

impl DeviceFingerprint {
    pub fn compute(uuid: Uuid, scheme: &str, name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(uuid.as_bytes());
        hasher.update(scheme.as_bytes());
        hasher.update(name.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Display for DeviceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex_encode(&self.0))
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_produce_same_fingerprint() {
        let uuid = Uuid::new_v4();
        let a = DeviceFingerprint::compute(uuid, "file", "My Drive");
        let b = DeviceFingerprint::compute(uuid, "file", "My Drive");
        assert_eq!(a, b);
    }

    #[test]
    fn different_scheme_produces_different_fingerprint() {
        let uuid = Uuid::new_v4();
        let a = DeviceFingerprint::compute(uuid, "file", "My Drive");
        let b = DeviceFingerprint::compute(uuid, "smb", "My Drive");
        assert_ne!(a, b);
    }
}
