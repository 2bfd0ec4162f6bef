use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum MediaType {
    Unknown = 0,
    Video = 1,
    Audio = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum MediaSubType {
    Unknown = 0,
    ShowEpisode = 1,
    Movie = 2,
    AlbumTrack = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum FileType {
    Main = 0,
    Part = 1,
    Soundtrack = 2,
    Subtitles = 3,
    Playlist = 4,
    Disc = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum LinkedFileType {
    None = 0,
    Subtitles = 1,
    SoundTrack = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ThumbnailOrigin {
    Artist = 0,
    AlbumArtist = 1,
    Album = 2,
    Media = 3,
    UserProvided = 4,
}

/// Bitmap over a task (§4.4). Stored as an integer column; use the `bits()`
/// helpers below rather than the enum repr directly since a task's value is
/// an OR of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserStep {
    MetadataExtraction = 0b001,
    MetadataAnalysis = 0b010,
    Linking = 0b100,
}

impl ParserStep {
    pub const COMPLETED_MASK: i32 = ParserStep::MetadataExtraction as i32 | ParserStep::MetadataAnalysis as i32;

    pub fn bit(self) -> i32 {
        self as i32
    }
}

/// Last known run result for a task (§4.4). `Unknown` must never be written
/// back as a run result — it only ever appears as the initial sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum TaskStatus {
    Unknown = 0,
    Success = 1,
    TemporaryUnavailable = 2,
    Requeue = 3,
    Fatal = 4,
    Completed = 5,
    Discarded = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum NotificationSetting {
    Inherit = 0,
    On = 1,
    Off = 2,
}

/// How a media came to be in the local cache (§4.7). `NotCached` media is
/// never evictable; manually cached media only becomes evictable once
/// played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum CacheType {
    NotCached = 0,
    Manual = 1,
    Automatic = 2,
}
