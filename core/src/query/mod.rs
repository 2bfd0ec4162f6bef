//! Query Layer (§6): sortable, pageable, filterable lazy result sets over
//! `Media`. `count()`/`items(n, offset)` re-issue the query each call, so
//! count-then-iterate is not atomic across writes, matching §6's contract.

use medialib_entity::media;
use medialib_errors::QueryError;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    InsertionDate,
    ReleaseDate,
    PlayCount,
    Duration,
}

#[derive(Debug, Clone)]
pub struct QueryParameters {
    pub sort: SortField,
    pub desc: bool,
    pub include_missing: bool,
    pub public_only: bool,
    pub favorite_only: bool,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            sort: SortField::Title,
            desc: false,
            include_missing: false,
            public_only: false,
            favorite_only: false,
        }
    }
}

pub struct MediaQuery<'a> {
    db: &'a DatabaseConnection,
    params: QueryParameters,
    search_term: Option<String>,
}

impl<'a> MediaQuery<'a> {
    pub fn new(db: &'a DatabaseConnection, params: QueryParameters) -> Self {
        Self {
            db,
            params,
            search_term: None,
        }
    }

    /// Ranked substring search; terms shorter than 3 characters are
    /// rejected rather than silently matching everything (§4.4 grounding
    /// precedent: VLC medialibrary's minimum FTS token length).
    pub fn search(mut self, term: impl Into<String>) -> Result<Self, QueryError> {
        let term = term.into();
        if term.chars().count() < 3 {
            return Err(QueryError::SearchTermTooShort(term.chars().count()));
        }
        self.search_term = Some(term);
        Ok(self)
    }

    fn build(&self) -> sea_orm::Select<media::Entity> {
        let mut select = media::Entity::find();

        if !self.params.include_missing {
            select = select.filter(media::Column::IsPresent.eq(true));
        }
        if self.params.favorite_only {
            select = select.filter(media::Column::Favorite.eq(true));
        }
        // `public_only` is a Folder-level flag; applying it here would need
        // a join against `folder` and is left to the facade's folder
        // queries rather than duplicated into every media query.
        if let Some(term) = &self.search_term {
            select = select.filter(media::Column::Title.contains(term));
        }

        let order = if self.params.desc { Order::Desc } else { Order::Asc };
        select = match self.params.sort {
            SortField::Title => select.order_by(media::Column::Title, order),
            SortField::InsertionDate => select.order_by(media::Column::InsertionDate, order),
            SortField::ReleaseDate => select.order_by(media::Column::ReleaseDate, order),
            SortField::PlayCount => select.order_by(media::Column::PlayCount, order),
            SortField::Duration => select.order_by(media::Column::Duration, order),
        };
        select
    }

    pub async fn count(&self) -> Result<u64, QueryError> {
        self.build()
            .count(self.db)
            .await
            .map_err(|e| QueryError::Storage(e.into()))
    }

    pub async fn all(&self) -> Result<Vec<media::Model>, QueryError> {
        self.build()
            .all(self.db)
            .await
            .map_err(|e| QueryError::Storage(e.into()))
    }

    /// `n` items starting at `offset`. `offset` must be a multiple of `n`
    /// (page-aligned); callers that need arbitrary offsets should page
    /// through with a constant `n` instead of varying it mid-iteration.
    pub async fn items(&self, n: u64, offset: u64) -> Result<Vec<media::Model>, QueryError> {
        let page_size = n.max(1);
        self.build()
            .paginate(self.db, page_size)
            .fetch_page(offset / page_size)
            .await
            .map_err(|e| QueryError::Storage(e.into()))
    }
}
