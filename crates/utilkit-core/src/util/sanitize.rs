//! Turn repository URLs into short, filesystem-safe, collision-resistant names.
//!
//! The name is a cleaned `host/path` prefix plus the first 8 hex characters
//! of the SHA-256 of the *original* input, e.g.
//! `https://github.com/owner/repo.git` -> `github-com-owner-repo-1a2b3c4d`.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use url::Url;

/// Subdirectory under the OS temp dir used for cloned repositories.
pub const DEFAULT_REPO_DIR_NAME: &str = "git-reviewer-repos";

const HASH_LEN: usize = 8;

static UNSAFE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("unsafe-chars pattern is valid"));

static HYPHEN_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-{2,}").expect("hyphen-run pattern is valid"));

/// Unique name for use as an object-storage key (no directory join).
pub fn generate_key_name(repo_url: &str) -> String {
    unique_name(repo_url)
}

/// Unique local path: `<temp>/<base_dir_name>/<unique name>`.
pub fn sanitize_url_to_unique_path(repo_url: &str, base_dir_name: &str) -> PathBuf {
    repo_cache_dir(base_dir_name).join(unique_name(repo_url))
}

/// Base directory that [`sanitize_url_to_unique_path`] joins onto.
pub fn repo_cache_dir(base_dir_name: &str) -> PathBuf {
    std::env::temp_dir().join(base_dir_name)
}

fn unique_name(repo_url: &str) -> String {
    let raw = raw_name(repo_url);
    let name = clean_name(raw.strip_suffix(".git").unwrap_or(&raw));
    let hash = short_hash(repo_url);

    if name.is_empty() {
        hash
    } else {
        format!("{}-{}", name, hash)
    }
}

/// `host + path` for parseable URLs, `host/path` for scp-style remotes,
/// otherwise the input as-is.
///
/// Parsed URLs are normalized first: `http(s)` hosts are lower-cased and
/// `.`/`..` path segments resolved.
fn raw_name(repo_url: &str) -> String {
    if let Ok(url) = Url::parse(repo_url) {
        if let Some(host) = url.host_str().filter(|h| !h.is_empty()) {
            let path = urlencoding::decode(url.path())
                .map(|p| p.into_owned())
                .unwrap_or_else(|_| url.path().to_string());
            return format!("{}{}", host, path);
        }
    }

    if let Some((host, path)) = split_scp_like(repo_url) {
        return format!("{}/{}", host, path);
    }

    tracing::debug!("Using raw input as repository name: {}", repo_url);
    repo_url.to_string()
}

/// Split `user@host:path` into `(host, path)`.
pub(crate) fn split_scp_like(s: &str) -> Option<(&str, &str)> {
    let (user, rest) = s.split_once('@')?;
    if user.is_empty() || user.contains(|c: char| c == '/' || c == ':') {
        return None;
    }
    let (host, path) = rest.split_once(':')?;
    if host.is_empty() || host.contains('/') {
        return None;
    }
    Some((host, path))
}

fn clean_name(name: &str) -> String {
    let name = UNSAFE_CHARS_RE.replace_all(name, "-");
    let name = HYPHEN_RUN_RE.replace_all(&name, "-");
    let name = name.strip_prefix('-').unwrap_or(&name);
    let name = name.strip_suffix('-').unwrap_or(name);
    name.to_string()
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_LEN);
    encoded
}
