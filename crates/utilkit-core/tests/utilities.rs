//! Integration tests for the public utility surface.

use chrono::{TimeZone, Utc};
use utilkit_core::error::{IoError, TimeError, UtilkitError};
use utilkit_core::util::{
    self, clean_string_from_emojis, format_jst, format_jst_string, generate_key_name, get_env,
    get_env_as_bool, get_repository_path, is_secure_service_url, jst_location, normalize_spaces,
    parse_comma_separated_list, read_input, repo_cache_dir, sanitize_url_to_unique_path, truncate,
    write_output, DEFAULT_REPO_DIR_NAME,
};

#[test]
fn test_unset_env_returns_defaults() {
    let key = "UTILKIT_IT_DEFINITELY_UNSET";
    std::env::remove_var(key);
    assert_eq!(get_env(key, "d"), "d");
    assert!(get_env_as_bool(key, true));
    assert!(!get_env_as_bool(key, false));
}

#[test]
fn test_comma_lists() {
    assert!(parse_comma_separated_list("").is_empty());
    assert!(parse_comma_separated_list(" , ,  ").is_empty());
    assert_eq!(parse_comma_separated_list("a, b ,c"), vec!["a", "b", "c"]);
}

#[test]
fn test_text_cleanup() {
    assert_eq!(normalize_spaces("  a   b "), "a b");
    assert_eq!(clean_string_from_emojis("👍🏻 hi"), "hi");
    assert_eq!(truncate("Hello", 10, "..."), "Hello");
    assert_eq!(truncate("This is a long text.", 10, "..."), "This is a...");
    assert_eq!(truncate("あいうえお", 3, "..."), "あいう...");
}

#[test]
fn test_clean_then_truncate_pipeline() {
    let input = "🚀  Release   notes:\n\tfixed 🐛 in parser 🎉";
    let cleaned = clean_string_from_emojis(input);
    assert_eq!(cleaned, "Release notes: fixed in parser");
    assert_eq!(truncate(&cleaned, 14, "…"), "Release notes:…");
}

#[test]
fn test_sanitizer_determinism() {
    let url = "https://github.com/owner/repo.git";
    assert_eq!(generate_key_name(url), generate_key_name(url));
    assert_ne!(
        generate_key_name(url),
        generate_key_name("https://github.com/owner/other.git")
    );

    let path = sanitize_url_to_unique_path(url, DEFAULT_REPO_DIR_NAME);
    assert_eq!(path, repo_cache_dir(DEFAULT_REPO_DIR_NAME).join(generate_key_name(url)));
    assert!(path.starts_with(std::env::temp_dir().join("git-reviewer-repos")));
}

#[test]
fn test_url_security() {
    assert!(is_secure_service_url("https://x/a"));
    assert!(!is_secure_service_url("http://example.com"));
    assert!(is_secure_service_url("http://localhost:8080"));
    assert!(!is_secure_service_url("ftp://x"));
    assert!(!is_secure_service_url(""));
}

#[test]
fn test_repository_path() {
    let cases = [
        ("https://github.com/shouni/go-utils.git", "shouni/go-utils"),
        ("https://gitlab.com/group/project", "group/project"),
        ("git@bitbucket.org:team/repository.git", "team/repository"),
        ("git@host.net:user/subgroup/repo-name.git", "user/subgroup/repo-name"),
        ("ssh://git@github.com/owner/repo.git", "owner/repo"),
        ("https://example.com/owner/repo/subdir", "owner/repo/subdir"),
        ("https://github.com/owner", "owner"),
        ("", ""),
        ("::invalid-url", "::invalid-url"),
    ];
    for (input, expected) in cases {
        assert_eq!(get_repository_path(input), expected, "input: {:?}", input);
    }
}

#[test]
fn test_io_roundtrip_and_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("roundtrip.txt");
    let name = path.to_str().unwrap();

    write_output(name, "こんにちは\n".as_bytes()).unwrap();
    assert_eq!(read_input(name).unwrap(), "こんにちは\n".as_bytes());

    let missing = tmp.path().join("missing.txt");
    let err: UtilkitError = read_input(missing.to_str().unwrap()).unwrap_err().into();
    assert!(matches!(err, UtilkitError::Io(IoError::ReadFile { .. })));
}

#[test]
fn test_prepare_cache_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join(generate_key_name("git@github.com:owner/repo.git"));
    let created = util::ensure_dir(&dir).unwrap();
    assert!(created.is_dir());
}

#[test]
fn test_jst_helpers() {
    assert!(std::ptr::eq(jst_location(), jst_location()));

    let utc = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(format_jst(&utc, "%Y/%m/%d %H:%M"), "2025/01/01 09:00");

    assert_eq!(format_jst_string("18:30", "%H:%M", "%H時%M分").unwrap(), "18時30分");
    assert_eq!(format_jst_string("18", "%H", "%H:%M").unwrap(), "18:00");
    assert_eq!(format_jst_string("2025-03", "%Y-%m", "%Y-%m-%d").unwrap(), "2025-03-01");
    assert_eq!(
        format_jst_string("2025-03-04 07", "%Y-%m-%d %H", "%Y-%m-%d %H:%M").unwrap(),
        "2025-03-04 07:00"
    );

    let err: UtilkitError = format_jst_string("25:00", "%H:%M", "%H時%M分")
        .unwrap_err()
        .into();
    assert!(matches!(err, UtilkitError::Time(TimeError::Parse { .. })));
}

#[test]
fn test_jst_location_shared_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| jst_location() as *const _ as usize))
        .collect();
    let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addrs.iter().all(|&a| a == addrs[0]));
    assert_eq!(addrs[0], jst_location() as *const _ as usize);
}
