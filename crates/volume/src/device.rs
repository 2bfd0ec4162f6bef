use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fingerprint::DeviceFingerprint;
use crate::mountpoint::{normalize_mrl, Mountpoint};

/// The logical storage unit behind one or more MRLs. Identity is the
/// `(uuid, scheme)` pair (§4.1); two schemes on the same uuid are
/// independent devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub uuid: Uuid,
    pub scheme: String,
    pub name: String,
    pub removable: bool,
    pub network: bool,
    pub present: bool,
    /// Monotonically grown; never pruned. Lookups pick the most-recently
    /// seen match.
    mountpoints: Vec<Mountpoint>,
}

impl Device {
    pub fn new(uuid: Uuid, scheme: impl Into<String>, name: impl Into<String>) -> Self {
        let scheme = scheme.into();
        let network = matches!(scheme.as_str(), "smb" | "nfs" | "ftp" | "afp");
        Self {
            uuid,
            scheme,
            name: name.into(),
            removable: false,
            network,
            present: false,
            mountpoints: Vec::new(),
        }
    }

    pub fn fingerprint(&self) -> DeviceFingerprint {
        DeviceFingerprint::compute(self.uuid, &self.scheme, &self.name)
    }

    /// Records (or refreshes) a mountpoint. Growth is monotonic: an
    /// existing mountpoint's `last_seen` is updated in place rather than
    /// duplicated.
    pub fn add_mountpoint(&mut self, mrl: &str, last_seen: DateTime<Utc>) {
        let normalized = normalize_mrl(mrl);
        if let Some(existing) = self.mountpoints.iter_mut().find(|m| m.mrl == normalized) {
            existing.last_seen = last_seen;
        } else {
            self.mountpoints.push(Mountpoint::new(normalized, last_seen));
        }
        self.present = true;
    }

    pub fn remove_mountpoint(&mut self, mrl: &str) {
        let normalized = normalize_mrl(mrl);
        self.mountpoints.retain(|m| m.mrl != normalized);
        if self.mountpoints.is_empty() {
            self.present = false;
        }
    }

    pub fn mountpoints(&self) -> &[Mountpoint] {
        &self.mountpoints
    }

    /// The mountpoint most recently observed, used to reconstruct an
    /// absolute MRL from a persisted relative one.
    pub fn current_mountpoint(&self) -> Option<&Mountpoint> {
        self.mountpoints.iter().max_by_key(|m| m.last_seen)
    }

    /// Splits an absolute MRL into a (device-relative) path if it falls
    /// under any of this device's known mountpoints, preferring the
    /// longest-prefix match and, among ties, the most-recently-seen one.
    pub fn relativize(&self, absolute_mrl: &str) -> Option<String> {
        let normalized = normalize_mrl(absolute_mrl);
        self.mountpoints
            .iter()
            .filter(|m| normalized.starts_with(m.mrl.as_str()))
            .max_by(|a, b| {
                a.mrl
                    .len()
                    .cmp(&b.mrl.len())
                    .then(a.last_seen.cmp(&b.last_seen))
            })
            .map(|m| normalized[m.mrl.len()..].trim_start_matches('/').to_string())
    }

    /// Joins the current mountpoint with a device-relative path to
    /// reconstruct an absolute MRL. Returns `None` if the device is absent.
    pub fn absolute_mrl(&self, relative: &str) -> Option<String> {
        let mount = self.current_mountpoint()?;
        if relative.is_empty() {
            Some(mount.mrl.clone())
        } else {
            Some(format!("{}/{}", mount.mrl, relative))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn relative_mrl_round_trips() {
        let mut device = Device::new(Uuid::new_v4(), "file", "disk");
        device.add_mountpoint("file:///mnt/dev", now());
        let absolute = "file:///mnt/dev/music/track1.mp3";
        let relative = device.relativize(absolute).unwrap();
        assert_eq!(relative, "music/track1.mp3");
        assert_eq!(device.absolute_mrl(&relative).unwrap(), absolute);
    }

    #[test]
    fn remount_updates_present_and_preserves_uuid() {
        let uuid = Uuid::new_v4();
        let mut device = Device::new(uuid, "file", "disk");
        device.add_mountpoint("file:///mnt/a", now());
        assert!(device.present);
        device.remove_mountpoint("file:///mnt/a");
        assert!(!device.present);
        device.add_mountpoint("file:///mnt/b", now());
        assert!(device.present);
        assert_eq!(device.uuid, uuid);
    }

    #[test]
    fn longest_mountpoint_prefix_wins() {
        let mut device = Device::new(Uuid::new_v4(), "file", "disk");
        device.add_mountpoint("file:///mnt", now());
        device.add_mountpoint("file:///mnt/dev", now());
        let relative = device.relativize("file:///mnt/dev/a.mp3").unwrap();
        assert_eq!(relative, "a.mp3");
    }
}
