pub mod env;
pub mod io;
pub mod jst;
pub mod sanitize;
pub mod text;
pub mod urlpath;

use std::path::{Path, PathBuf};

use crate::error::IoError;

pub use env::{get_env, get_env_as_bool};
pub use io::{read_input, write_output};
pub use jst::{format_jst, format_jst_string, jst_location, now_jst, to_jst};
pub use sanitize::{generate_key_name, repo_cache_dir, sanitize_url_to_unique_path, DEFAULT_REPO_DIR_NAME};
pub use text::{clean_string_from_emojis, normalize_spaces, parse_comma_separated_list, remove_emojis, truncate};
pub use urlpath::{get_repository_path, is_secure_service_url, is_secure_service_url_with};

/// Create `path` and any missing parents (e.g. a repository cache directory
/// from [`sanitize_url_to_unique_path`]) and hand it back.
pub fn ensure_dir(path: &Path) -> Result<PathBuf, IoError> {
    std::fs::create_dir_all(path).map_err(|source| IoError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
