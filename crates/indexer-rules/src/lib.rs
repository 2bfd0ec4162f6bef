//! Ban-list and `.nomedia` rejection logic for the Discoverer (§4.3),
//! adapted from the indexer-rules crate in the grounding codebase: a set of
//! per-kind rules (`RulePerKind`) compiled once and evaluated against every
//! path the walker visits.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid glob pattern {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("non utf-8 path")]
    NonUtf8Path,

    #[error("failed to (de)serialize rule parameters: {0}")]
    RuleParametersCodec(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The kind of a compiled rule, mirroring the teacher's `RuleKind` variant
/// set exactly (§4.3's ban/`.nomedia` semantics map onto these).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    AcceptFilesByGlob = 0,
    RejectFilesByGlob = 1,
    AcceptIfChildrenDirectoriesArePresent = 2,
    RejectIfChildrenDirectoriesArePresent = 3,
    IgnoredByGit = 4,
}

/// A compiled rule, ready for repeated evaluation.
pub enum RulePerKind {
    AcceptFilesByGlob(Vec<String>, GlobSet),
    RejectFilesByGlob(Vec<String>, GlobSet),
    AcceptIfChildrenDirectoriesArePresent(HashSet<String>),
    RejectIfChildrenDirectoriesArePresent(HashSet<String>),
    /// `.nomedia`/`.gitignore`-style ignore file rooted at `base_dir`.
    IgnoredByGit(PathBuf, gix_ignore::Search),
}

impl RulePerKind {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::AcceptFilesByGlob(..) => RuleKind::AcceptFilesByGlob,
            Self::RejectFilesByGlob(..) => RuleKind::RejectFilesByGlob,
            Self::AcceptIfChildrenDirectoriesArePresent(..) => {
                RuleKind::AcceptIfChildrenDirectoriesArePresent
            }
            Self::RejectIfChildrenDirectoriesArePresent(..) => {
                RuleKind::RejectIfChildrenDirectoriesArePresent
            }
            Self::IgnoredByGit(..) => RuleKind::IgnoredByGit,
        }
    }

    pub fn accept_glob(patterns: &[&str]) -> Result<Self, Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern).map_err(|source| Error::Glob {
                pattern: pattern.to_string(),
                source,
            })?);
        }
        Ok(Self::AcceptFilesByGlob(
            patterns.iter().map(|s| s.to_string()).collect(),
            builder.build().expect("glob patterns already validated above"),
        ))
    }

    pub fn reject_glob(patterns: &[&str]) -> Result<Self, Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern).map_err(|source| Error::Glob {
                pattern: pattern.to_string(),
                source,
            })?);
        }
        Ok(Self::RejectFilesByGlob(
            patterns.iter().map(|s| s.to_string()).collect(),
            builder.build().expect("glob patterns already validated above"),
        ))
    }

    /// Builds a git-ignore-style matcher rooted at `base_dir`, reused
    /// verbatim for `.nomedia` subtree skipping: one sentinel-derived
    /// pattern (`*`) rooted at the directory containing it is enough to
    /// make every descendant match.
    pub fn ignored_by_sentinel(base_dir: impl Into<PathBuf>) -> Self {
        // The search object itself is unused for sentinel-based rejection:
        // once a `.nomedia` file is found in a directory, every descendant
        // of that directory is rejected by path-prefix alone (see
        // `RulePerKind::matches`). It is kept on the variant for type
        // parity with `RuleKind::IgnoredByGit`, which a future git-ignore
        // rule would populate with real patterns.
        Self::IgnoredByGit(base_dir.into(), gix_ignore::Search::default())
    }

    fn matches(&self, path: &Path, is_dir: bool) -> bool {
        match self {
            Self::AcceptFilesByGlob(_, set) | Self::RejectFilesByGlob(_, set) => {
                !is_dir && set.is_match(path)
            }
            Self::AcceptIfChildrenDirectoriesArePresent(children)
            | Self::RejectIfChildrenDirectoriesArePresent(children) => {
                if !is_dir {
                    return false;
                }
                fs::read_dir(path)
                    .map(|entries| {
                        entries.flatten().any(|e| {
                            e.file_type().map(|t| t.is_dir()).unwrap_or(false)
                                && e.file_name()
                                    .to_str()
                                    .map(|name| children.contains(name))
                                    .unwrap_or(false)
                        })
                    })
                    .unwrap_or(false)
            }
            Self::IgnoredByGit(base_dir, _search) => path.starts_with(base_dir),
        }
    }
}

/// One named rule: a default (system) rule or a user-added one, wrapping a
/// compiled `RulePerKind`.
pub struct IndexerRule {
    pub name: String,
    pub default: bool,
    pub rule: RulePerKind,
}

impl IndexerRule {
    pub fn new(name: impl Into<String>, default: bool, rule: RulePerKind) -> Self {
        Self {
            name: name.into(),
            default,
            rule,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerDecision {
    Accept,
    Reject,
}

/// The combined rule set consulted by the Discoverer for every path: a
/// `base` set (system ban rules, `.nomedia` sentinels collected so far) plus
/// `extra` user rules added on top. Short-circuit order matches the
/// teacher's `reject_path`: reject-glob, then git/`.nomedia`-ignore, then
/// reject-by-children, then (if nothing rejected) accept-glob.
#[derive(Default)]
pub struct IndexerRuler {
    base: Vec<IndexerRule>,
    extra: Vec<IndexerRule>,
}

impl IndexerRuler {
    pub fn new(base: Vec<IndexerRule>) -> Self {
        Self {
            base,
            extra: Vec::new(),
        }
    }

    pub fn extend(&mut self, rules: Vec<IndexerRule>) {
        self.extra.extend(rules);
    }

    pub fn has_system(&self) -> bool {
        self.base.iter().any(|r| r.default)
    }

    fn rules(&self) -> impl Iterator<Item = &IndexerRule> {
        self.base.iter().chain(self.extra.iter())
    }

    fn rejected_by_reject_glob(&self, path: &Path, is_dir: bool) -> bool {
        self.rules()
            .any(|r| matches!(r.rule.kind(), RuleKind::RejectFilesByGlob) && r.rule.matches(path, is_dir))
    }

    fn rejected_by_git_ignore(&self, path: &Path, is_dir: bool) -> bool {
        self.rules()
            .any(|r| matches!(r.rule.kind(), RuleKind::IgnoredByGit) && r.rule.matches(path, is_dir))
    }

    fn rejected_by_children_directories(&self, path: &Path, is_dir: bool) -> bool {
        self.rules().any(|r| {
            matches!(r.rule.kind(), RuleKind::RejectIfChildrenDirectoriesArePresent)
                && r.rule.matches(path, is_dir)
        })
    }

    fn rejected_by_accept_glob(&self, path: &Path, is_dir: bool) -> bool {
        let mut has_accept_glob = false;
        let mut accepted = false;
        for r in self.rules() {
            if matches!(r.rule.kind(), RuleKind::AcceptFilesByGlob) {
                has_accept_glob = true;
                if r.rule.matches(path, is_dir) {
                    accepted = true;
                }
            }
        }
        has_accept_glob && !accepted
    }

    /// The same short-circuit order the teacher uses: an explicit reject
    /// beats any accept.
    pub fn reject_path(&self, path: &Path, is_dir: bool) -> bool {
        self.rejected_by_reject_glob(path, is_dir)
            || self.rejected_by_git_ignore(path, is_dir)
            || self.rejected_by_children_directories(path, is_dir)
            || self.rejected_by_accept_glob(path, is_dir)
    }

    pub fn evaluate_path(&self, path: &Path, is_dir: bool) -> RulerDecision {
        if self.reject_path(path, is_dir) {
            RulerDecision::Reject
        } else {
            RulerDecision::Accept
        }
    }
}

/// True if `dir` directly contains a `.nomedia` sentinel file.
pub fn has_nomedia_sentinel(dir: &Path) -> std::io::Result<bool> {
    Ok(dir.join(".nomedia").is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn ruler_with(rules: Vec<IndexerRule>) -> IndexerRuler {
        IndexerRuler::new(rules)
    }

    #[test]
    fn test_reject_hidden_file() {
        let root = tempdir().unwrap();
        let hidden = root.path().join(".hidden.mp3");
        File::create(&hidden).unwrap();
        let ruler = ruler_with(vec![IndexerRule::new(
            "no hidden",
            true,
            RulePerKind::reject_glob(&["**/.*"]).unwrap(),
        )]);
        assert_eq!(ruler.evaluate_path(&hidden, false), RulerDecision::Reject);
    }

    #[test]
    fn test_only_media_extensions_accepted() {
        let root = tempdir().unwrap();
        let mp3 = root.path().join("track.mp3");
        let txt = root.path().join("notes.txt");
        File::create(&mp3).unwrap();
        File::create(&txt).unwrap();
        let ruler = ruler_with(vec![IndexerRule::new(
            "media only",
            true,
            RulePerKind::accept_glob(&["*.mp3", "*.mp4", "*.flac", "*.mkv"]).unwrap(),
        )]);
        assert_eq!(ruler.evaluate_path(&mp3, false), RulerDecision::Accept);
        assert_eq!(ruler.evaluate_path(&txt, false), RulerDecision::Reject);
    }

    #[test]
    fn test_directory_with_children_accepted() {
        let root = tempdir().unwrap();
        let artist_dir = root.path().join("artist");
        fs::create_dir_all(artist_dir.join("Disc 1")).unwrap();
        let mut children = HashSet::new();
        children.insert("Disc 1".to_string());
        let ruler = ruler_with(vec![IndexerRule::new(
            "has disc subfolder",
            false,
            RulePerKind::AcceptIfChildrenDirectoriesArePresent(children),
        )]);
        assert_eq!(ruler.evaluate_path(&artist_dir, true), RulerDecision::Accept);
    }

    #[test]
    fn test_nomedia_sentinel_rejects_subtree() {
        let root = tempdir().unwrap();
        let subtree = root.path().join("private");
        fs::create_dir_all(&subtree).unwrap();
        File::create(subtree.join(".nomedia")).unwrap();
        assert!(has_nomedia_sentinel(&subtree).unwrap());

        let mut ruler = IndexerRuler::default();
        ruler.extend(vec![IndexerRule::new(
            "nomedia",
            false,
            RulePerKind::ignored_by_sentinel(subtree.clone()),
        )]);
        let nested = subtree.join("song.mp3");
        assert_eq!(ruler.evaluate_path(&nested, false), RulerDecision::Reject);
    }

    #[test]
    fn test_reject_wins_over_accept() {
        let root = tempdir().unwrap();
        let sample = root.path().join("sample.mp3");
        File::create(&sample).unwrap();
        let ruler = ruler_with(vec![
            IndexerRule::new("accept media", true, RulePerKind::accept_glob(&["*.mp3"]).unwrap()),
            IndexerRule::new("reject samples", true, RulePerKind::reject_glob(&["sample.*"]).unwrap()),
        ]);
        assert_eq!(ruler.evaluate_path(&sample, false), RulerDecision::Reject);
    }
}
