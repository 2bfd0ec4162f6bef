//! Persists `medialib_volume::DeviceRegistry` state into the `device`/
//! `device_mountpoint` tables and exposes the mount/unmount event glue
//! (§4.1) the Discoverer and facade consume.

use medialib_entity::{device, device_mountpoint};
use medialib_errors::DeviceError;
use medialib_volume::{Device, DeviceRegistry as InMemoryRegistry};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::storage::classify_db_error;

/// One device observation reported by a host-injected [`DeviceLister`].
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    pub uuid: Uuid,
    pub scheme: String,
    pub mountpoint: String,
    pub removable: bool,
}

/// Host-injected device enumeration (§6 `set_device_lister`), mirroring the
/// filesystem factory's "this crate ships none, the host provides the OS
/// integration" contract.
pub trait DeviceLister: Send + Sync {
    fn list(&self) -> Vec<DeviceDescriptor>;
}

pub struct DeviceRegistry {
    db: DatabaseConnection,
    inner: RwLock<InMemoryRegistry>,
}

impl DeviceRegistry {
    /// Loads every persisted device and its mountpoint history into the
    /// in-memory index.
    #[instrument(skip_all)]
    pub async fn load(db: DatabaseConnection) -> Result<Self, DeviceError> {
        let mut inner = InMemoryRegistry::new();

        let rows = device::Entity::find()
            .all(&db)
            .await
            .map_err(|e| DeviceError::InvalidMrl(e.to_string()))?;

        for row in rows {
            let uuid = Uuid::parse_str(&row.uuid).unwrap_or_else(|_| Uuid::nil());
            let mut dev = Device::new(uuid, row.scheme.clone(), row.scheme.clone());
            dev.removable = row.removable;
            dev.network = row.network;

            let mountpoints = device_mountpoint::Entity::find()
                .filter(device_mountpoint::Column::DeviceId.eq(row.id))
                .all(&db)
                .await
                .map_err(|e| DeviceError::InvalidMrl(e.to_string()))?;
            for mp in mountpoints {
                dev.add_mountpoint(&mp.mrl, mp.last_seen);
            }
            if !row.present {
                dev.present = false;
            }
            inner.register(dev);
        }

        info!(count = inner.iter().count(), "loaded device registry");
        Ok(Self {
            db,
            inner: RwLock::new(inner),
        })
    }

    pub async fn from_mountpoint(&self, absolute_mrl: &str) -> Result<(Uuid, String, String), DeviceError> {
        let guard = self.inner.read().await;
        guard
            .from_mountpoint(absolute_mrl)
            .map(|(device, relative)| (device.uuid, device.scheme.clone(), relative))
            .ok_or_else(|| DeviceError::NoMatchingMountpoint(absolute_mrl.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn on_device_mounted(
        &self,
        uuid: Uuid,
        scheme: &str,
        mountpoint: &str,
        removable: bool,
    ) -> Result<(), DeviceError> {
        {
            let mut guard = self.inner.write().await;
            guard.on_device_mounted(uuid, scheme, mountpoint, removable);
        }
        self.persist_device(uuid, scheme).await
    }

    #[instrument(skip(self))]
    pub async fn on_device_unmounted(&self, uuid: Uuid, scheme: &str, mountpoint: &str) -> Result<(), DeviceError> {
        {
            let mut guard = self.inner.write().await;
            guard.on_device_unmounted(uuid, scheme, mountpoint);
        }
        self.persist_device(uuid, scheme).await
    }

    async fn persist_device(&self, uuid: Uuid, scheme: &str) -> Result<(), DeviceError> {
        let guard = self.inner.read().await;
        let device = guard
            .lookup(uuid, scheme)
            .ok_or_else(|| DeviceError::UnknownDevice {
                uuid: uuid.to_string(),
                scheme: scheme.to_string(),
            })?;

        let existing = device::Entity::find()
            .filter(device::Column::Uuid.eq(uuid.to_string()))
            .filter(device::Column::Scheme.eq(scheme.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| DeviceError::InvalidMrl(e.to_string()))?;

        let row_id = match existing {
            Some(row) => {
                let mut active: device::ActiveModel = row.into();
                active.removable = Set(device.removable);
                active.network = Set(device.network);
                active.present = Set(device.present);
                let updated = device::Entity::update(active)
                    .exec(&self.db)
                    .await
                    .map_err(|e| DeviceError::InvalidMrl(classify_db_error(e).to_string()))?;
                updated.id
            }
            None => {
                let active = device::ActiveModel {
                    id: sea_orm::ActiveValue::NotSet,
                    uuid: Set(uuid.to_string()),
                    scheme: Set(scheme.to_string()),
                    removable: Set(device.removable),
                    network: Set(device.network),
                    present: Set(device.present),
                };
                let inserted = device::Entity::insert(active)
                    .exec(&self.db)
                    .await
                    .map_err(|e| DeviceError::InvalidMrl(classify_db_error(e).to_string()))?;
                inserted.last_insert_id
            }
        };

        for mp in device.mountpoints() {
            let existing_mp = device_mountpoint::Entity::find()
                .filter(device_mountpoint::Column::DeviceId.eq(row_id))
                .filter(device_mountpoint::Column::Mrl.eq(mp.mrl.clone()))
                .one(&self.db)
                .await
                .map_err(|e| DeviceError::InvalidMrl(e.to_string()))?;

            match existing_mp {
                Some(row) => {
                    let mut active: device_mountpoint::ActiveModel = row.into();
                    active.last_seen = Set(mp.last_seen);
                    device_mountpoint::Entity::update(active)
                        .exec(&self.db)
                        .await
                        .map_err(|e| DeviceError::InvalidMrl(e.to_string()))?;
                }
                None => {
                    let active = device_mountpoint::ActiveModel {
                        id: sea_orm::ActiveValue::NotSet,
                        device_id: Set(row_id),
                        mrl: Set(mp.mrl.clone()),
                        last_seen: Set(mp.last_seen),
                    };
                    device_mountpoint::Entity::insert(active)
                        .exec(&self.db)
                        .await
                        .map_err(|e| DeviceError::InvalidMrl(e.to_string()))?;
                }
            }
        }

        Ok(())
    }
}
