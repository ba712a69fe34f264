//! URL classification helpers.

use url::{Host, Url};

use super::sanitize::split_scp_like;

/// Hostnames that count as secure over plain HTTP (local development).
pub const LOCAL_DEV_HOSTNAMES: &[&str] = &["localhost", "127.0.0.1", "::1"];

/// Whether `service_url` is safe to treat as secure (e.g. for `Secure`
/// cookies): HTTPS anywhere, or HTTP on a local development host.
///
/// Unparseable URLs and other schemes are insecure.
pub fn is_secure_service_url(service_url: &str) -> bool {
    is_secure_service_url_with::<&str>(service_url, &[])
}

/// Like [`is_secure_service_url`], with extra local development hostnames.
///
/// Hostnames are compared case-insensitively.
pub fn is_secure_service_url_with<S: AsRef<str>>(service_url: &str, extra_hosts: &[S]) -> bool {
    let Ok(url) = Url::parse(service_url) else {
        return false;
    };

    match url.scheme() {
        "https" => true,
        "http" => {
            let Some(hostname) = hostname(&url) else {
                return false;
            };
            LOCAL_DEV_HOSTNAMES.contains(&hostname.as_str())
                || extra_hosts
                    .iter()
                    .any(|h| h.as_ref().eq_ignore_ascii_case(&hostname))
        }
        _ => false,
    }
}

/// Extract the `owner/repo` path of a repository URL, without surrounding
/// slashes or a `.git` suffix.
///
/// Handles URLs with a host (`https://`, `ssh://`, ...) and scp-style
/// `user@host:path` remotes. Anything else is returned unchanged.
pub fn get_repository_path(repo_url: &str) -> String {
    let path = match Url::parse(repo_url) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => url.path().to_string(),
        _ => match split_scp_like(repo_url) {
            Some((_, path)) => path.to_string(),
            None => return repo_url.to_string(),
        },
    };

    let trimmed = path.trim_matches('/');
    trimmed
        .strip_suffix(".git")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

/// Lower-cased hostname, IPv6 literals without brackets.
fn hostname(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => Some(domain.to_ascii_lowercase()),
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}
