//! CLI cache integration tests
//!
//! These tests run the `kbkit` binary against a scratch cache root and check
//! that data lands on stdout while status and table records land on stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn kbkit(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kbkit"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("KBKIT_LOG_LEVEL")
        .env_remove("KBKIT_VERBOSE")
        .env_remove("KBKIT_CACHE_ROOT")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn setup_sources(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let root = temp_dir.path().join("cache");
    let note = temp_dir.path().join("note.txt");
    fs::write(&note, "Hello from the cache").unwrap();
    (root, note)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_cli_put_then_show() {
    let temp_dir = TempDir::new().unwrap();
    let (root, note) = setup_sources(&temp_dir);
    let root_arg = root.to_str().unwrap();

    let put = kbkit(
        temp_dir.path(),
        &["cache", "put", note.to_str().unwrap(), "--root", root_arg],
    );
    assert!(put.status.success(), "put failed: {}", stderr(&put));

    let cached_path = stdout(&put).trim().to_string();
    assert!(Path::new(&cached_path).is_file());
    assert!(cached_path.ends_with(".json"));

    let entry: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&cached_path).unwrap()).unwrap();
    assert_eq!(entry["page_content"], "Hello from the cache");
    assert_eq!(entry["metadata"]["source"], note.display().to_string());

    let show = kbkit(
        temp_dir.path(),
        &["cache", "show", &cached_path, "--root", root_arg],
    );
    assert!(show.status.success(), "show failed: {}", stderr(&show));
    assert_eq!(stdout(&show).trim(), "Hello from the cache");
}

#[test]
fn test_cli_list_prints_status_and_table() {
    let temp_dir = TempDir::new().unwrap();
    let (root, note) = setup_sources(&temp_dir);
    let root_arg = root.to_str().unwrap();
    let other = temp_dir.path().join("other.md");
    fs::write(&other, "# Other").unwrap();

    for file in [&note, &other] {
        let put = kbkit(
            temp_dir.path(),
            &["cache", "put", file.to_str().unwrap(), "--root", root_arg],
        );
        assert!(put.status.success(), "put failed: {}", stderr(&put));
    }

    let list = kbkit(
        temp_dir.path(),
        &["--table", "plain", "cache", "list", "--root", root_arg],
    );
    assert!(list.status.success(), "list failed: {}", stderr(&list));

    let err = stderr(&list);
    let start = err.find("[START] Loading cached documents").unwrap();
    let end = err.find("[END] Loading cached documents").unwrap();
    assert!(start < end);
    assert!(err.contains("#  source"));
    assert!(err.contains("note.txt"));
    assert!(err.contains("other.md"));
    assert!(err.contains("2 cached documents"));
    assert!(err.contains("kbkit::commands::cache INFO"));
}

#[test]
fn test_cli_list_default_table_is_silent() {
    let temp_dir = TempDir::new().unwrap();
    let (root, note) = setup_sources(&temp_dir);
    let root_arg = root.to_str().unwrap();

    kbkit(
        temp_dir.path(),
        &["cache", "put", note.to_str().unwrap(), "--root", root_arg],
    );
    let list = kbkit(temp_dir.path(), &["cache", "list", "--root", root_arg]);

    assert!(list.status.success());
    let err = stderr(&list);
    assert!(err.contains("1 cached documents"));
    assert!(!err.contains("#  source"));
}

#[test]
fn test_cli_list_empty_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("nothing-here");

    let list = kbkit(
        temp_dir.path(),
        &["cache", "list", "--root", root.to_str().unwrap()],
    );

    assert!(list.status.success(), "list failed: {}", stderr(&list));
    assert!(stderr(&list).contains("0 cached documents"));
}

#[test]
fn test_cli_show_missing_entry_fails() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("cache");

    let show = kbkit(
        temp_dir.path(),
        &[
            "cache",
            "show",
            "ab/missing.json",
            "--root",
            root.to_str().unwrap(),
        ],
    );

    assert_eq!(show.status.code(), Some(1));
    assert!(stdout(&show).is_empty());
    assert!(stderr(&show).contains("Error: No cached document at"));
}

#[test]
fn test_cli_verbose_flag_shows_debug_records() {
    let temp_dir = TempDir::new().unwrap();
    let (root, note) = setup_sources(&temp_dir);

    let put = kbkit(
        temp_dir.path(),
        &[
            "--verbose",
            "cache",
            "put",
            note.to_str().unwrap(),
            "--root",
            root.to_str().unwrap(),
        ],
    );

    assert!(put.status.success(), "put failed: {}", stderr(&put));
    assert!(stderr(&put).contains("DEBUG Caching"));
}

#[test]
fn test_cli_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("kbkit.toml");
    fs::write(&config, "[output]\nrenderer = \"fancy\"\n").unwrap();

    let list = kbkit(
        temp_dir.path(),
        &["--config", config.to_str().unwrap(), "cache", "list"],
    );

    assert_eq!(list.status.code(), Some(1));
    assert!(stderr(&list).contains("Error: Invalid configuration"));
}

#[test]
fn test_cli_config_file_sets_cache_root() {
    let temp_dir = TempDir::new().unwrap();
    let (root, note) = setup_sources(&temp_dir);
    let config = temp_dir.path().join("kbkit.toml");
    fs::write(
        &config,
        format!("[cache]\nroot = {:?}\n", root.to_str().unwrap()),
    )
    .unwrap();

    let put = kbkit(
        temp_dir.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "cache",
            "put",
            note.to_str().unwrap(),
        ],
    );

    assert!(put.status.success(), "put failed: {}", stderr(&put));
    assert!(stdout(&put).trim().starts_with(root.to_str().unwrap()));
}
