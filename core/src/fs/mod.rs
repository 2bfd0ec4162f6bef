//! The Filesystem Abstraction (§4.2): a per-scheme factory producing
//! `Directory`/`File` views. `LocalFs` implements the `file://` scheme
//! directly atop `std::fs`; other schemes are injected by the host via
//! `FileSystemFactory`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use medialib_errors::FsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedFileType {
    None,
    Subtitles,
    SoundTrack,
}

#[derive(Debug, Clone)]
pub struct FileView {
    pub name: String,
    pub mrl: String,
    pub extension: String,
    pub size: u64,
    pub last_modification_date: DateTime<Utc>,
    pub is_network: bool,
    pub linked_file_type: LinkedFileType,
    pub linked_target_mrl: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DirectoryView {
    pub mrl: String,
    pub subdirectories: Vec<String>,
    pub files: Vec<FileView>,
    pub device_scheme: String,
}

/// Produces `Directory`/`File` views for one URI scheme.
pub trait FileSystemFactory: Send + Sync {
    fn scheme(&self) -> &str;
    fn read_directory(&self, mrl: &str) -> Result<DirectoryView, FsError>;
    fn is_directory(&self, mrl: &str) -> Result<bool, FsError>;
}

/// `file://` implementation atop `std::fs`. No case-sensitivity assumption
/// is made beyond what the host OS provides.
#[derive(Debug, Default)]
pub struct LocalFs;

const MEDIA_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "ogg", "wav", "m4a", "aac", "mp4", "mkv", "avi", "mov", "webm",
];
const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "ass", "ssa", "vtt", "sub"];

impl LocalFs {
    fn to_path(mrl: &str) -> Result<PathBuf, FsError> {
        mrl.strip_prefix("file://")
            .map(PathBuf::from)
            .ok_or_else(|| FsError::UnknownScheme(mrl.to_string()))
    }

    fn to_mrl(path: &Path) -> String {
        format!("file://{}", path.display())
    }

    fn classify(extension: &str) -> LinkedFileType {
        let lower = extension.to_ascii_lowercase();
        if SUBTITLE_EXTENSIONS.contains(&lower.as_str()) {
            LinkedFileType::Subtitles
        } else {
            LinkedFileType::None
        }
    }

    pub fn is_media_extension(extension: &str) -> bool {
        MEDIA_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
    }

    pub fn is_subtitle_extension(extension: &str) -> bool {
        SUBTITLE_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
    }
}

impl FileSystemFactory for LocalFs {
    fn scheme(&self) -> &str {
        "file"
    }

    fn read_directory(&self, mrl: &str) -> Result<DirectoryView, FsError> {
        let path = Self::to_path(mrl)?;
        let entries = std::fs::read_dir(&path).map_err(|source| FsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut subdirectories = Vec::new();
        let mut files = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|source| FsError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let entry_path = entry.path();
            let file_type = entry.file_type().map_err(|source| FsError::Io {
                path: entry_path.display().to_string(),
                source,
            })?;

            if file_type.is_dir() {
                subdirectories.push(entry.file_name().to_string_lossy().to_string());
                continue;
            }

            let metadata = entry.metadata().map_err(|source| FsError::Io {
                path: entry_path.display().to_string(),
                source,
            })?;
            let extension = entry_path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            let modified: DateTime<Utc> = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            files.push(FileView {
                name: entry.file_name().to_string_lossy().to_string(),
                mrl: Self::to_mrl(&entry_path),
                extension: extension.clone(),
                size: metadata.len(),
                last_modification_date: modified,
                is_network: false,
                linked_file_type: Self::classify(&extension),
                linked_target_mrl: None,
            });
        }

        Ok(DirectoryView {
            mrl: mrl.to_string(),
            subdirectories,
            files,
            device_scheme: "file".to_string(),
        })
    }

    fn is_directory(&self, mrl: &str) -> Result<bool, FsError> {
        let path = Self::to_path(mrl)?;
        Ok(path.is_dir())
    }
}

/// Scheme → factory registry, populated by the host for non-local schemes
/// (`smb`, `nfs`, …) via `set_device_lister`/`add_network_file_system_factory`.
#[derive(Default)]
pub struct FileSystemRegistry {
    factories: HashMap<String, Box<dyn FileSystemFactory>>,
}

impl FileSystemRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register(Box::new(LocalFs));
        registry
    }

    pub fn register(&mut self, factory: Box<dyn FileSystemFactory>) {
        self.factories.insert(factory.scheme().to_string(), factory);
    }

    pub fn factory_for(&self, scheme: &str) -> Result<&dyn FileSystemFactory, FsError> {
        self.factories
            .get(scheme)
            .map(|b| b.as_ref())
            .ok_or_else(|| FsError::UnknownScheme(scheme.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn reads_directory_and_classifies_subtitles() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("track.mp3")).unwrap();
        File::create(dir.path().join("track.srt")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let fs = LocalFs;
        let mrl = format!("file://{}", dir.path().display());
        let view = fs.read_directory(&mrl).unwrap();

        assert_eq!(view.subdirectories, vec!["sub".to_string()]);
        assert_eq!(view.files.len(), 2);
        let srt = view.files.iter().find(|f| f.name == "track.srt").unwrap();
        assert_eq!(srt.linked_file_type, LinkedFileType::Subtitles);
    }

    #[test]
    fn unknown_scheme_errors() {
        let registry = FileSystemRegistry::new();
        assert!(registry.factory_for("smb").is_err());
    }
}
