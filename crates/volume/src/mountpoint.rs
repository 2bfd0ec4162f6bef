use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default ports honored when comparing network mountpoints, so that
/// `smb://host:445/share` and `smb://host/share` compare equal.
const DEFAULT_PORTS: &[(&str, u16)] = &[("smb", 445), ("nfs", 2049), ("ftp", 21)];

/// One observed mountpoint for a device, ranked by `last_seen` for
/// tie-breaking among overlapping matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mountpoint {
    pub mrl: String,
    pub last_seen: DateTime<Utc>,
}

impl Mountpoint {
    pub fn new(mrl: impl Into<String>, last_seen: DateTime<Utc>) -> Self {
        Self {
            mrl: normalize_mrl(&mrl.into()),
            last_seen,
        }
    }
}

/// Normalizes an MRL for mountpoint comparison: lower-cases the scheme and
/// host, strips a default port matching the scheme, and collapses trailing
/// path-separator runs — matching §4.1's comparison policy.
pub fn normalize_mrl(mrl: &str) -> String {
    let Some(scheme_end) = mrl.find("://") else {
        return strip_trailing_slashes(mrl).to_string();
    };
    let scheme = mrl[..scheme_end].to_ascii_lowercase();
    let rest = &mrl[scheme_end + 3..];

    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };

    let (host, port) = match authority.rsplit_once(':') {
        Some((h, p)) if p.chars().all(|c| c.is_ascii_digit()) => (h, Some(p)),
        _ => (authority, None),
    };
    let host = host.to_ascii_lowercase();

    let default_port = DEFAULT_PORTS
        .iter()
        .find(|(s, _)| *s == scheme)
        .map(|(_, p)| p.to_string());

    let authority_norm = match port {
        Some(p) if default_port.as_deref() == Some(p) => host,
        Some(p) => format!("{host}:{p}"),
        None => host,
    };

    let path_norm = strip_trailing_slashes(path);
    format!("{scheme}://{authority_norm}{path_norm}")
}

fn strip_trailing_slashes(s: &str) -> &str {
    if s == "/" {
        return s;
    }
    s.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_trailing_slashes() {
        assert_eq!(
            normalize_mrl("FILE://Host/a/b/"),
            normalize_mrl("file://host/a/b")
        );
    }

    #[test]
    fn normalizes_default_smb_port() {
        assert_eq!(
            normalize_mrl("smb://host:445/share"),
            normalize_mrl("smb://host/share")
        );
    }

    #[test]
    fn non_default_port_is_preserved() {
        assert_ne!(
            normalize_mrl("smb://host:139/share"),
            normalize_mrl("smb://host/share")
        );
    }

    #[test]
    fn root_path_is_not_stripped_to_empty() {
        assert_eq!(normalize_mrl("file:///"), "file:///");
    }
}
