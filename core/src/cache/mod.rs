//! Cache Manager (§4.7): resolves effective per-subscription quota from the
//! nearest non-inherit ancestor (service, then the global setting), and
//! orders automatic eviction by descending play_count, ascending
//! release_date, restricted to evictable media.

use medialib_entity::{media, playlist_item, service, settings, subscription, CacheType};
use medialib_errors::CacheError;
use sea_orm::{sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::instrument;

#[derive(Debug, Clone, Copy)]
pub struct Quota {
    pub max_cached_media: Option<i64>,
    pub max_cached_size: Option<i64>,
}

pub struct CacheManager<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CacheManager<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Walks up the subscription's ancestor chain (a forest rooted at a
    /// `Service`) until a non-inherit value is found for each of
    /// `max_cached_media`/`max_cached_size`; falls back to the owning
    /// service, then the global setting (§4.7). `max_cached_media` has no
    /// global counterpart, so it stays `None` past the service.
    #[instrument(skip(self))]
    pub async fn effective_quota(&self, subscription_id: i32) -> Result<Quota, CacheError> {
        let mut current = subscription::Entity::find_by_id(subscription_id)
            .one(self.db)
            .await
            .map_err(|e| CacheError::Storage(e.into()))?
            .ok_or_else(|| CacheError::NoQuota(subscription_id.to_string()))?;

        let mut max_cached_media = None;
        let mut max_cached_size = None;
        let mut service_id = current.service_id;

        loop {
            if max_cached_media.is_none() && current.max_cached_media >= 0 {
                max_cached_media = Some(current.max_cached_media as i64);
            }
            if max_cached_size.is_none() && current.max_cached_size >= 0 {
                max_cached_size = Some(current.max_cached_size);
            }
            service_id = current.service_id;

            if max_cached_media.is_some() && max_cached_size.is_some() {
                break;
            }
            match current.parent_id {
                Some(parent_id) => {
                    current = subscription::Entity::find_by_id(parent_id)
                        .one(self.db)
                        .await
                        .map_err(|e| CacheError::Storage(e.into()))?
                        .ok_or_else(|| CacheError::NoQuota(parent_id.to_string()))?;
                }
                None => break,
            }
        }

        if max_cached_size.is_none() {
            if let Some(service_row) = service::Entity::find_by_id(service_id)
                .one(self.db)
                .await
                .map_err(|e| CacheError::Storage(e.into()))?
            {
                if service_row.max_cached_size >= 0 {
                    max_cached_size = Some(service_row.max_cached_size);
                }
            }
        }

        if max_cached_size.is_none() {
            let global = settings::Entity::find_by_id("global_cache_quota_bytes".to_string())
                .one(self.db)
                .await
                .map_err(|e| CacheError::Storage(e.into()))?
                .and_then(|row| row.value.parse::<i64>().ok())
                .unwrap_or(-1);
            if global >= 0 {
                max_cached_size = Some(global);
            }
        }

        Ok(Quota {
            max_cached_media,
            max_cached_size,
        })
    }

    /// Selects evictable media ids in eviction order: descending
    /// `play_count`, then ascending `release_date`. Evictable iff
    /// (manually cached AND already played) OR (automatically cached AND
    /// not yet handled in this pass) — §4.7.
    #[instrument(skip(self))]
    pub async fn eviction_candidates(&self, limit: u64) -> Result<Vec<i32>, CacheError> {
        let condition = Condition::any()
            .add(
                Condition::all()
                    .add(media::Column::CacheType.eq(CacheType::Automatic))
                    .add(media::Column::CacheHandled.eq(false)),
            )
            .add(
                Condition::all()
                    .add(media::Column::CacheType.eq(CacheType::Manual))
                    .add(media::Column::PlayCount.gt(0)),
            );

        let rows = media::Entity::find()
            .filter(condition)
            .all(self.db)
            .await
            .map_err(|e| CacheError::Storage(e.into()))?;

        let mut candidates: Vec<_> = rows
            .into_iter()
            .map(|m| (m.id, m.play_count, m.release_date))
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        candidates.truncate(limit as usize);
        Ok(candidates.into_iter().map(|(id, ..)| id).collect())
    }

    /// Marks every automatically-cached media belonging to `subscription_id`
    /// (via its backing playlist) as handled, so a later
    /// `eviction_candidates` call in the same pass skips them.
    #[instrument(skip(self))]
    pub async fn mark_cache_as_handled(&self, subscription_id: i32) -> Result<u64, CacheError> {
        let subscription_row = subscription::Entity::find_by_id(subscription_id)
            .one(self.db)
            .await
            .map_err(|e| CacheError::Storage(e.into()))?
            .ok_or_else(|| CacheError::NoQuota(subscription_id.to_string()))?;

        let media_ids: Vec<i32> = playlist_item::Entity::find()
            .filter(playlist_item::Column::PlaylistId.eq(subscription_row.playlist_id))
            .all(self.db)
            .await
            .map_err(|e| CacheError::Storage(e.into()))?
            .into_iter()
            .filter_map(|item| item.media_id)
            .collect();

        if media_ids.is_empty() {
            return Ok(0);
        }

        let result = media::Entity::update_many()
            .col_expr(media::Column::CacheHandled, Expr::value(true))
            .filter(media::Column::Id.is_in(media_ids))
            .filter(media::Column::CacheType.eq(CacheType::Automatic))
            .exec(self.db)
            .await
            .map_err(|e| CacheError::Storage(e.into()))?;

        Ok(result.rows_affected)
    }
}
