use super::*;
use std::path::Path;

#[test]
fn test_get_config_path() {
    let data_dir = Path::new("/srv/crowdfund");
    assert_eq!(
        get_config_path(data_dir),
        Path::new("/srv/crowdfund/crowdfund.toml")
    );
}

#[test]
fn test_default_file_names() {
    assert_eq!(USERS_FILE, "users.json");
    assert_eq!(PROJECTS_FILE, "projects.json");
}

#[test]
fn test_default_log_dir_under_crowdfund_home() {
    let log_dir = get_default_log_dir();
    assert!(log_dir.ends_with("logs"));
    assert!(log_dir.starts_with(get_crowdfund_home()));
}

#[test]
fn test_now_local_has_whole_seconds() {
    let now = now_local();
    let rendered = now.format(TIMESTAMP_FORMAT).to_string();
    let parsed = chrono::NaiveDateTime::parse_from_str(&rendered, TIMESTAMP_FORMAT)
        .expect("Should round-trip through the timestamp layout");
    assert_eq!(parsed, now);
}
