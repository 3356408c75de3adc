use snare::config::{Config, DEFAULT_LISTEN_ADDR, DEFAULT_RECORDS_PATH, DEFAULT_THRESHOLD};
use std::io::Write;
use std::sync::Mutex;

// Env vars are process-global; serialize the tests that touch them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    unsafe {
        std::env::remove_var("SNARE_CONFIG");
        std::env::remove_var("SNARE_LISTEN");
        std::env::remove_var("SNARE_THRESHOLD");
        std::env::remove_var("SNARE_RECORDS");
    }
}

#[test]
fn test_config_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = Config::load();
    assert_eq!(cfg.server.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.bait.threshold, DEFAULT_THRESHOLD);
    assert_eq!(cfg.bait.records_path, DEFAULT_RECORDS_PATH);
}

#[test]
fn test_config_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    unsafe {
        std::env::set_var("SNARE_LISTEN", "0.0.0.0:9022");
        std::env::set_var("SNARE_THRESHOLD", "5");
        std::env::set_var("SNARE_RECORDS", "/tmp/staff.json");
    }

    let cfg = Config::load();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:9022");
    assert_eq!(cfg.bait.threshold, 5);
    assert_eq!(cfg.bait.records_path, "/tmp/staff.json");

    clear_env();
}

#[test]
fn test_config_zero_and_negative_threshold_accepted() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    unsafe {
        std::env::set_var("SNARE_THRESHOLD", "0");
    }
    assert_eq!(Config::load().bait.threshold, 0);

    unsafe {
        std::env::set_var("SNARE_THRESHOLD", "-2");
    }
    assert_eq!(Config::load().bait.threshold, -2);

    clear_env();
}

#[test]
fn test_config_bad_threshold_keeps_default() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    unsafe {
        std::env::set_var("SNARE_THRESHOLD", "many");
    }

    let cfg = Config::load();
    assert_eq!(cfg.bait.threshold, DEFAULT_THRESHOLD);

    clear_env();
}

#[test]
fn test_config_from_yaml_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "server:\n  listen_addr: \"127.0.0.1:4444\"\nbait:\n  threshold: 7\n  records_path: \"decoy.json\"\n"
    )
    .unwrap();

    unsafe {
        std::env::set_var("SNARE_CONFIG", file.path());
    }

    let cfg = Config::load();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:4444");
    assert_eq!(cfg.bait.threshold, 7);
    assert_eq!(cfg.bait.records_path, "decoy.json");

    clear_env();
}

#[test]
fn test_config_partial_yaml_fills_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bait:\n  threshold: 9\n").unwrap();

    unsafe {
        std::env::set_var("SNARE_CONFIG", file.path());
    }

    let cfg = Config::load();
    assert_eq!(cfg.bait.threshold, 9);
    assert_eq!(cfg.server.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.bait.records_path, DEFAULT_RECORDS_PATH);

    clear_env();
}

#[test]
fn test_config_env_wins_over_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bait:\n  threshold: 7\n").unwrap();

    unsafe {
        std::env::set_var("SNARE_CONFIG", file.path());
        std::env::set_var("SNARE_THRESHOLD", "2");
    }

    let cfg = Config::load();
    assert_eq!(cfg.bait.threshold, 2);

    clear_env();
}

#[test]
fn test_config_missing_file_falls_back_to_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    unsafe {
        std::env::set_var("SNARE_CONFIG", "/nonexistent/snare.yaml");
    }

    let cfg = Config::load();
    assert_eq!(cfg.server.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.bait.threshold, DEFAULT_THRESHOLD);

    clear_env();
}
