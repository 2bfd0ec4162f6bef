use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::device::Device;
use crate::mountpoint::normalize_mrl;

pub type DeviceKey = (Uuid, String);

/// In-memory index of known devices, keyed by `(uuid, scheme)`. Callers
/// needing concurrent access wrap this in `tokio::sync::RwLock`, matching
/// §5's "entity caches are mutex-protected, lookup-or-load is atomic"
/// policy — the registry itself stays single-threaded and simple.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<DeviceKey, Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, device: Device) {
        self.devices.insert((device.uuid, device.scheme.clone()), device);
    }

    pub fn lookup(&self, uuid: Uuid, scheme: &str) -> Option<&Device> {
        self.devices.get(&(uuid, scheme.to_string()))
    }

    pub fn lookup_mut(&mut self, uuid: Uuid, scheme: &str) -> Option<&mut Device> {
        self.devices.get_mut(&(uuid, scheme.to_string()))
    }

    /// Longest-matching-mountpoint-wins resolution of an absolute MRL to a
    /// device plus the device-relative remainder.
    pub fn from_mountpoint(&self, absolute_mrl: &str) -> Option<(&Device, String)> {
        let normalized = normalize_mrl(absolute_mrl);
        self.devices
            .values()
            .filter_map(|device| {
                device
                    .mountpoints()
                    .iter()
                    .filter(|m| normalized.starts_with(m.mrl.as_str()))
                    .max_by(|a, b| a.mrl.len().cmp(&b.mrl.len()).then(a.last_seen.cmp(&b.last_seen)))
                    .map(|m| (device, m))
            })
            .max_by(|(_, a), (_, b)| a.mrl.len().cmp(&b.mrl.len()).then(a.last_seen.cmp(&b.last_seen)))
            .map(|(device, m)| {
                let relative = normalized[m.mrl.len()..].trim_start_matches('/').to_string();
                (device, relative)
            })
    }

    pub fn add_mountpoint(&mut self, uuid: Uuid, scheme: &str, mrl: &str, last_seen: DateTime<Utc>) -> bool {
        match self.lookup_mut(uuid, scheme) {
            Some(device) => {
                device.add_mountpoint(mrl, last_seen);
                true
            }
            None => false,
        }
    }

    pub fn on_device_mounted(&mut self, uuid: Uuid, scheme: &str, mountpoint: &str, removable: bool) {
        let now = Utc::now();
        if !self.add_mountpoint(uuid, scheme, mountpoint, now) {
            let mut device = Device::new(uuid, scheme, mountpoint);
            device.removable = removable;
            device.add_mountpoint(mountpoint, now);
            self.register(device);
        }
    }

    pub fn on_device_unmounted(&mut self, uuid: Uuid, scheme: &str, mountpoint: &str) {
        if let Some(device) = self.lookup_mut(uuid, scheme) {
            device.remove_mountpoint(mountpoint);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmount_then_remount_preserves_identity() {
        let mut registry = DeviceRegistry::new();
        let uuid = Uuid::new_v4();
        registry.on_device_mounted(uuid, "file", "file:///mnt/dev", true);
        assert!(registry.lookup(uuid, "file").unwrap().present);

        registry.on_device_unmounted(uuid, "file", "file:///mnt/dev");
        assert!(!registry.lookup(uuid, "file").unwrap().present);

        registry.on_device_mounted(uuid, "file", "file:///mnt/dev2", true);
        let device = registry.lookup(uuid, "file").unwrap();
        assert!(device.present);
        assert_eq!(device.uuid, uuid);
    }

    #[test]
    fn from_mountpoint_picks_longest_match() {
        let mut registry = DeviceRegistry::new();
        let outer = Uuid::new_v4();
        let inner = Uuid::new_v4();
        registry.on_device_mounted(outer, "file", "file:///mnt", false);
        registry.on_device_mounted(inner, "file", "file:///mnt/dev", true);

        let (device, relative) = registry.from_mountpoint("file:///mnt/dev/a.mp3").unwrap();
        assert_eq!(device.uuid, inner);
        assert_eq!(relative, "a.mp3");
    }

    #[test]
    fn same_uuid_different_scheme_are_independent() {
        let mut registry = DeviceRegistry::new();
        let uuid = Uuid::new_v4();
        registry.on_device_mounted(uuid, "file", "file:///mnt", false);
        registry.on_device_mounted(uuid, "smb", "smb://host/share", false);
        assert!(registry.lookup(uuid, "file").is_some());
        assert!(registry.lookup(uuid, "smb").is_some());
        assert_ne!(
            registry.lookup(uuid, "file").unwrap().network,
            registry.lookup(uuid, "smb").unwrap().network
        );
    }
}
