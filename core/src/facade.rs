//! The Public Facade (§6): the single entry point a host application
//! drives. Aggregates the Storage Engine, Device Registry, Filesystem
//! Abstraction, Discoverer, Parser Pipeline, Cache Manager and Query Layer
//! behind the operation list of §6.

use std::sync::{Arc, RwLock as StdRwLock};

use medialib_entity::{folder, media, media_group};
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::cache::CacheManager;
use crate::callbacks::{Callbacks, NullCallbacks};
use crate::config::Config;
use crate::device_registry::{DeviceLister, DeviceRegistry};
use crate::discoverer::Discoverer;
use crate::error::{Error, Result};
use crate::fs::{FileSystemFactory, FileSystemRegistry};
use crate::parser::{ParserPipeline, ParserService};
use crate::query::{MediaQuery, QueryParameters};
use crate::storage::{self, OpenOutcome};
use crate::thumbnail::Thumbnailer;

/// One running library instance. Not `Clone`; share via `Arc<MediaLibrary>`.
pub struct MediaLibrary {
    db: DatabaseConnection,
    config: Config,
    devices: DeviceRegistry,
    fs_registry: StdRwLock<FileSystemRegistry>,
    parser: ParserPipeline,
    callbacks: Arc<dyn Callbacks>,
    paused: StdRwLock<bool>,
    verbosity: RwLock<String>,
    device_lister: StdRwLock<Option<Arc<dyn DeviceLister>>>,
    discover_network_enabled: StdRwLock<bool>,
    thumbnailers: StdRwLock<Vec<Arc<dyn Thumbnailer>>>,
}

impl MediaLibrary {
    /// `initialize`: opens (and migrates, if needed) the database, loads
    /// the device registry, and wires the parser pipeline. Returns both the
    /// instance and the schema-open outcome so the host can surface a
    /// `DbReset` notice if one occurred (§7).
    #[instrument(skip(config, services, callbacks))]
    pub async fn initialize(
        config: Config,
        services: Vec<Arc<dyn ParserService>>,
        callbacks: Option<Arc<dyn Callbacks>>,
    ) -> Result<(Arc<Self>, OpenOutcome)> {
        let (db, outcome) = storage::open(&config.db_path).await?;
        let devices = DeviceRegistry::load(db.clone()).await?;
        let fs_registry = FileSystemRegistry::new();
        let worker_count = config.worker_counts.metadata_extraction.max(1);
        let parser = ParserPipeline::new(db.clone(), worker_count, services);
        let callbacks = callbacks.unwrap_or_else(|| Arc::new(NullCallbacks));
        let verbosity = config.verbosity.clone();

        info!(?outcome, "library initialized");

        Ok((
            Arc::new(Self {
                db,
                config,
                devices,
                fs_registry: StdRwLock::new(fs_registry),
                parser,
                callbacks,
                paused: StdRwLock::new(false),
                verbosity: RwLock::new(verbosity),
                device_lister: StdRwLock::new(None),
                discover_network_enabled: StdRwLock::new(false),
                thumbnailers: StdRwLock::new(Vec::new()),
            }),
            outcome,
        ))
    }

    pub async fn set_verbosity(&self, level: impl Into<String>) {
        *self.verbosity.write().await = level.into();
    }

    pub fn pause_background_operations(&self) {
        *self.paused.write().expect("paused lock poisoned") = true;
    }

    pub fn resume_background_operations(&self) {
        *self.paused.write().expect("paused lock poisoned") = false;
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.read().expect("paused lock poisoned")
    }

    // -- Roots / Discovery ---------------------------------------------

    #[instrument(skip(self))]
    pub async fn discover(&self, root_mrl: &str) -> Result<usize> {
        let (uuid, scheme, _relative) = self
            .devices
            .from_mountpoint(root_mrl)
            .await
            .map_err(Error::from)?;
        let device_row = self.device_row(uuid, &scheme).await?;
        let (visited, to_parse) = {
            let fs_registry = self.fs_registry.read().expect("fs registry lock poisoned");
            let discoverer = Discoverer::new(&self.db, &fs_registry);
            discoverer
                .discover(root_mrl, device_row, self.callbacks.as_ref())
                .await
                .map_err(Error::from)?
        };
        for (media_id, file_id) in to_parse {
            self.parser
                .enqueue(media_id, file_id, self.callbacks.clone())
                .await
                .map_err(Error::from)?;
        }
        Ok(visited)
    }

    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<()> {
        self.callbacks.reload_started();
        let roots = self.roots().await?;
        for root in roots {
            self.discover(&root).await?;
        }
        self.callbacks.reload_completed();
        Ok(())
    }

    pub async fn remove_root(&self, root_mrl: &str) -> Result<()> {
        if let Some(folder) = folder::Entity::find()
            .filter(folder::Column::Mrl.eq(root_mrl.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
        {
            folder::Entity::delete_by_id(folder.id)
                .exec(&self.db)
                .await
                .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
            self.callbacks.root_removed(root_mrl);
        }
        Ok(())
    }

    pub async fn ban_folder(&self, folder_id: i32) -> Result<()> {
        let fs_registry = self.fs_registry.read().expect("fs registry lock poisoned");
        let discoverer = Discoverer::new(&self.db, &fs_registry);
        discoverer.ban_folder(folder_id).await.map_err(Error::from)?;
        self.callbacks.folder_banned(folder_id);
        Ok(())
    }

    pub async fn unban_folder(&self, folder_id: i32) -> Result<()> {
        if let Some(row) = folder::Entity::find_by_id(folder_id)
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
        {
            let mut active: folder::ActiveModel = row.into();
            active.banned = Set(false);
            folder::Entity::update(active)
                .exec(&self.db)
                .await
                .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
            self.callbacks.folder_unbanned(folder_id);
        }
        Ok(())
    }

    pub async fn is_banned(&self, folder_id: i32) -> Result<bool> {
        Ok(folder::Entity::find_by_id(folder_id)
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            .map(|f| f.banned)
            .unwrap_or(false))
    }

    pub async fn is_indexed(&self, folder_mrl: &str) -> Result<bool> {
        Ok(folder::Entity::find()
            .filter(folder::Column::Mrl.eq(folder_mrl.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            .is_some())
    }

    pub async fn roots(&self) -> Result<Vec<String>> {
        Ok(folder::Entity::find()
            .filter(folder::Column::ParentId.is_null())
            .filter(folder::Column::Banned.eq(false))
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            .into_iter()
            .map(|f| f.mrl)
            .collect())
    }

    pub async fn banned_roots(&self) -> Result<Vec<String>> {
        Ok(folder::Entity::find()
            .filter(folder::Column::Banned.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            .into_iter()
            .map(|f| f.mrl)
            .collect())
    }

    async fn device_row(&self, uuid: uuid::Uuid, scheme: &str) -> Result<i32> {
        use medialib_entity::device;
        device::Entity::find()
            .filter(device::Column::Uuid.eq(uuid.to_string()))
            .filter(device::Column::Scheme.eq(scheme.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            .map(|d| d.id)
            .ok_or_else(|| {
                Error::from(medialib_errors::DeviceError::UnknownDevice {
                    uuid: uuid.to_string(),
                    scheme: scheme.to_string(),
                })
            })
    }

    // -- Entity access & search ------------------------------------------

    pub fn media(&self, params: QueryParameters) -> MediaQuery<'_> {
        MediaQuery::new(&self.db, params)
    }

    pub async fn search_media(&self, term: &str, params: QueryParameters) -> Result<Vec<media::Model>> {
        let query = MediaQuery::new(&self.db, params).search(term).map_err(Error::from)?;
        query.all().await.map_err(Error::from)
    }

    // -- Mutation ---------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn create_media_group(&self, name: &str) -> Result<i32> {
        let active = media_group::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(name.to_string()),
            forced_singleton: Set(false),
            nb_media: Set(0),
            nb_present_media: Set(0),
        };
        let inserted = media_group::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(inserted.last_insert_id)
    }

    pub async fn delete_media_group(&self, group_id: i32) -> Result<()> {
        media_group::Entity::delete_by_id(group_id)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(())
    }

    /// Pulls `media_id` out of its current group into a fresh forced
    /// singleton named after its title (§4.6/§8 scenario 4). A no-op,
    /// returning the existing group, if the media is already alone in a
    /// forced singleton. `trg_media_group_update`/`trg_media_group_delete`
    /// handle the old group's counters and GC it if it was an ordinary
    /// (non-forced) group that just emptied out.
    #[instrument(skip(self))]
    pub async fn remove_media_from_group(&self, media_id: i32) -> Result<i32> {
        let media_row = media::Entity::find_by_id(media_id)
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            .ok_or(Error::MediaNotFound(media_id))?;

        let current_group = media_group::Entity::find_by_id(media_row.group_id)
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        if let Some(current_group) = &current_group {
            if current_group.forced_singleton && current_group.nb_media <= 1 {
                return Ok(current_group.id);
            }
        }

        let new_group_id = self.create_media_group(&media_row.title).await?;
        let row = media_group::Entity::find_by_id(new_group_id)
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            .expect("just inserted");
        let mut active: media_group::ActiveModel = row.into();
        active.forced_singleton = Set(true);
        media_group::Entity::update(active)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;

        self.move_media_to_group(media_id, new_group_id).await?;
        Ok(new_group_id)
    }

    /// Moves `media_id` into `group_id`. If this empties a forced-singleton
    /// group, deletes it explicitly: `trg_media_group_delete`/`_update` only
    /// GC ordinary groups, since a forced singleton is meant to survive
    /// (re-add elsewhere is the one case it should not, handled here).
    #[instrument(skip(self))]
    pub async fn move_media_to_group(&self, media_id: i32, group_id: i32) -> Result<()> {
        let media_row = media::Entity::find_by_id(media_id)
            .one(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            .ok_or(Error::MediaNotFound(media_id))?;
        let old_group_id = media_row.group_id;

        let mut active: media::ActiveModel = media_row.into();
        active.group_id = Set(group_id);
        media::Entity::update(active)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;

        if old_group_id != group_id {
            if let Some(old_group) = media_group::Entity::find_by_id(old_group_id)
                .one(&self.db)
                .await
                .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
            {
                if old_group.forced_singleton && old_group.nb_media <= 0 {
                    media_group::Entity::delete_by_id(old_group_id)
                        .exec(&self.db)
                        .await
                        .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
                }
            }
        }
        Ok(())
    }

    /// Adds a media the discoverer never will: a user-provided external
    /// file or stream URL, always present, standalone (its own singleton
    /// group unless `group_id` is supplied).
    #[instrument(skip(self))]
    pub async fn add_external_media(&self, mrl: &str, title: &str, is_stream: bool) -> Result<i32> {
        let group_id = self.create_media_group(title).await?;
        {
            let row = media_group::Entity::find_by_id(group_id)
                .one(&self.db)
                .await
                .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?
                .expect("just inserted");
            let mut active: media_group::ActiveModel = row.into();
            active.forced_singleton = Set(true);
            media_group::Entity::update(active)
                .exec(&self.db)
                .await
                .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        }

        let active = media::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            title: Set(title.to_string()),
            title_forced: Set(true),
            media_type: Set(medialib_entity::MediaType::Unknown),
            media_sub_type: Set(medialib_entity::MediaSubType::Unknown),
            duration: Set(0),
            play_count: Set(0),
            last_position: Set(-1.0),
            last_time: Set(-1),
            last_played_date: Set(None),
            insertion_date: Set(chrono::Utc::now()),
            release_date: Set(None),
            favorite: Set(false),
            is_discovered: Set(false),
            is_external: Set(!is_stream),
            is_stream: Set(is_stream),
            is_present: Set(true),
            cache_type: Set(medialib_entity::CacheType::NotCached),
            cache_handled: Set(false),
            group_id: Set(group_id),
            folder_id: Set(None),
        };
        let inserted = media::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;

        let file_active = medialib_entity::file::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            media_id: Set(inserted.last_insert_id),
            mrl: Set(mrl.to_string()),
            file_type: Set(medialib_entity::FileType::Main),
            linked_file_type: Set(medialib_entity::LinkedFileType::None),
            linked_file_id: Set(None),
            size: Set(0),
            last_modification_date: Set(chrono::Utc::now()),
            is_network: Set(is_stream),
        };
        let file_inserted = medialib_entity::file::Entity::insert(file_active)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;

        self.callbacks.entities_added(crate::callbacks::EntityKind::Media, &[inserted.last_insert_id]);
        self.parser
            .enqueue(inserted.last_insert_id, file_inserted.last_insert_id, self.callbacks.clone())
            .await
            .map_err(Error::from)?;
        Ok(inserted.last_insert_id)
    }

    pub async fn add_stream(&self, url: &str, title: &str) -> Result<i32> {
        self.add_external_media(url, title, true).await
    }

    pub async fn remove_external_media(&self, media_id: i32) -> Result<()> {
        media::Entity::delete_by_id(media_id)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn clear_history(&self) -> Result<()> {
        let _ = media::Entity::update_many()
            .col_expr(media::Column::PlayCount, sea_orm::sea_query::Expr::value(0))
            .col_expr(media::Column::LastPosition, sea_orm::sea_query::Expr::value(-1.0))
            .col_expr(media::Column::LastTime, sea_orm::sea_query::Expr::value(-1))
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn force_rescan(&self) -> Result<()> {
        self.reload().await
    }

    pub async fn force_parser_retry(&self) -> Result<usize> {
        self.parser.force_retry(self.callbacks.clone()).await.map_err(Error::from)
    }

    pub fn cache_manager(&self) -> CacheManager<'_> {
        CacheManager::new(&self.db)
    }

    /// Marks the instance as ready to dispatch background work. Discovery
    /// and parsing are otherwise driven explicitly by `discover`/`enqueue`
    /// calls, so this is mostly a hook for hosts that gate their own
    /// scheduling on it.
    pub fn start(&self) {
        self.resume_background_operations();
        info!("library started");
    }

    // -- Entity listing ---------------------------------------------------

    pub async fn albums(&self) -> Result<Vec<medialib_entity::album::Model>> {
        medialib_entity::album::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))
    }

    pub async fn artists(&self) -> Result<Vec<medialib_entity::artist::Model>> {
        medialib_entity::artist::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))
    }

    pub async fn genres(&self) -> Result<Vec<medialib_entity::genre::Model>> {
        medialib_entity::genre::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))
    }

    pub async fn shows(&self) -> Result<Vec<medialib_entity::show::Model>> {
        medialib_entity::show::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))
    }

    pub async fn playlists(&self) -> Result<Vec<medialib_entity::playlist::Model>> {
        medialib_entity::playlist::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))
    }

    pub async fn media_groups(&self) -> Result<Vec<media_group::Model>> {
        media_group::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))
    }

    pub async fn folders(&self) -> Result<Vec<folder::Model>> {
        folder::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))
    }

    // -- Labels (aliased onto Genre: the schema carries no separate
    // free-text label table, and Genre is the nearest named-tag concept) --

    pub async fn create_label(&self, name: &str) -> Result<i32> {
        use medialib_entity::genre;
        let active = genre::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(name.to_string()),
            nb_tracks: Set(0),
            nb_present_tracks: Set(0),
        };
        let inserted = genre::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(inserted.last_insert_id)
    }

    pub async fn delete_label(&self, label_id: i32) -> Result<()> {
        use medialib_entity::genre;
        genre::Entity::delete_by_id(label_id)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(())
    }

    // -- Playlists ----------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn create_playlist(&self, name: &str) -> Result<i32> {
        use medialib_entity::playlist;
        let active = playlist::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(name.to_string()),
            file_id: Set(None),
            creation_date: Set(chrono::Utc::now()),
            artist_id: Set(None),
            nb_media: Set(0),
            nb_present_media: Set(0),
            nb_video: Set(0),
            nb_audio: Set(0),
            nb_unknown: Set(0),
            duration: Set(0),
            favorite: Set(false),
        };
        let inserted = playlist::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(inserted.last_insert_id)
    }

    pub async fn delete_playlist(&self, playlist_id: i32) -> Result<()> {
        use medialib_entity::playlist;
        playlist::Entity::delete_by_id(playlist_id)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(())
    }

    pub async fn append_to_playlist(&self, playlist_id: i32, media_id: i32) -> Result<i32> {
        use medialib_entity::playlist_item;
        use sea_orm::PaginatorTrait;

        let next_position = playlist_item::Entity::find()
            .filter(playlist_item::Column::PlaylistId.eq(playlist_id))
            .count(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))? as i32;

        let active = playlist_item::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            playlist_id: Set(playlist_id),
            media_id: Set(Some(media_id)),
            mrl: Set(None),
            position: Set(next_position),
        };
        let inserted = playlist_item::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        Ok(inserted.last_insert_id)
    }

    /// Moves the item at `from_position` to `to_position`, shifting every
    /// item strictly between them by one slot, keeping `position` a dense
    /// 0-based ordering with no gaps or duplicates.
    #[instrument(skip(self))]
    pub async fn move_playlist_item(&self, playlist_id: i32, from_position: i32, to_position: i32) -> Result<()> {
        use medialib_entity::playlist_item;

        if from_position == to_position {
            return Ok(());
        }

        let mut items = playlist_item::Entity::find()
            .filter(playlist_item::Column::PlaylistId.eq(playlist_id))
            .order_by_asc(playlist_item::Column::Position)
            .all(&self.db)
            .await
            .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;

        let from = from_position as usize;
        let to = to_position as usize;
        if from >= items.len() || to >= items.len() {
            return Ok(());
        }
        let moved = items.remove(from);
        items.insert(to, moved);

        for (position, item) in items.into_iter().enumerate() {
            if item.position == position as i32 {
                continue;
            }
            let mut active: playlist_item::ActiveModel = item.into();
            active.position = Set(position as i32);
            playlist_item::Entity::update(active)
                .exec(&self.db)
                .await
                .map_err(|e| Error::from(medialib_errors::StorageError::from(e)))?;
        }
        Ok(())
    }

    // -- Device/FS injection & extensions -------------------------------

    pub fn set_device_lister(&self, lister: Arc<dyn DeviceLister>) {
        *self.device_lister.write().expect("device lister lock poisoned") = Some(lister);
    }

    /// Polls the currently registered lister (if any) and feeds every
    /// observation through the normal mount/unmount event path.
    #[instrument(skip(self))]
    pub async fn refresh_devices(&self) -> Result<()> {
        let lister = self
            .device_lister
            .read()
            .expect("device lister lock poisoned")
            .clone();
        let Some(lister) = lister else { return Ok(()) };
        for descriptor in lister.list() {
            self.devices
                .on_device_mounted(
                    descriptor.uuid,
                    &descriptor.scheme,
                    &descriptor.mountpoint,
                    descriptor.removable,
                )
                .await
                .map_err(Error::from)?;
        }
        Ok(())
    }

    pub fn add_network_file_system_factory(&self, factory: Box<dyn FileSystemFactory>) {
        self.fs_registry
            .write()
            .expect("fs registry lock poisoned")
            .register(factory);
    }

    pub fn set_discover_network_enabled(&self, enabled: bool) {
        *self
            .discover_network_enabled
            .write()
            .expect("discover_network_enabled lock poisoned") = enabled;
    }

    pub fn discover_network_enabled(&self) -> bool {
        *self
            .discover_network_enabled
            .read()
            .expect("discover_network_enabled lock poisoned")
    }

    pub async fn add_parser_service(&self, service: Arc<dyn ParserService>) {
        self.parser.add_service(service).await;
    }

    pub fn add_thumbnailer(&self, thumbnailer: Arc<dyn Thumbnailer>) {
        self.thumbnailers.write().expect("thumbnailer lock poisoned").push(thumbnailer);
    }

    pub async fn shutdown(&self) {
        self.parser.shutdown().await;
    }
}
