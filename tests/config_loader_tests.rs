use devnotify::config::ConfigLoader;
use std::{
    env, fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    unsafe {
        env::remove_var("DEVNOTIFY_PROFILE");
        env::remove_var("DEVNOTIFY_API_BIND_ADDR");
        env::remove_var("DEVNOTIFY_LOG_LEVEL");
        env::remove_var("DEVNOTIFY_WEBHOOK_GITHUB_SECRET");
        env::remove_var("DEVNOTIFY_TELEGRAM_BOT_TOKEN");
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_defaults_when_no_env_present() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.api_bind_addr, "0.0.0.0:8000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.webhook_github_secret.is_none());
    cfg.bind_addr().expect("default bind addr parses");
    clear_env();
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "DEVNOTIFY_API_BIND_ADDR=127.0.0.1:3000\n");
    write_env_file(
        &temp_dir,
        ".env.test",
        "DEVNOTIFY_API_BIND_ADDR=192.168.0.10:5000\n",
    );
    write_env_file(
        &temp_dir,
        ".env.test.local",
        "DEVNOTIFY_API_BIND_ADDR=10.0.0.5:6000\n",
    );

    // Select profile via .env.local before profile-specific files load.
    write_env_file(
        &temp_dir,
        ".env.local",
        "DEVNOTIFY_PROFILE=test\nDEVNOTIFY_API_BIND_ADDR=127.0.0.1:4000\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with layered env files");

    assert_eq!(cfg.profile, "test");
    assert_eq!(cfg.api_bind_addr, "10.0.0.5:6000");
    clear_env();
}

#[test]
fn os_environment_has_highest_precedence() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "DEVNOTIFY_API_BIND_ADDR=127.0.0.1:3000\n");

    unsafe {
        env::set_var("DEVNOTIFY_API_BIND_ADDR", "0.0.0.0:9090");
    }

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with env override");
    assert_eq!(cfg.api_bind_addr, "0.0.0.0:9090");

    clear_env();
}

#[test]
fn invalid_bind_addr_returns_error() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "DEVNOTIFY_API_BIND_ADDR=not-an-addr\n");

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("invalid bind addr should fail");
    assert!(format!("{}", err).contains("invalid api bind address"));

    clear_env();
}

#[test]
fn production_profile_requires_a_bot_token() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "DEVNOTIFY_PROFILE=production\n");

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("missing bot token should fail");
    assert!(format!("{}", err).contains("bot token"));

    write_env_file(
        &temp_dir,
        ".env.production",
        "DEVNOTIFY_TELEGRAM_BOT_TOKEN=123:abc\n",
    );
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("token satisfies validation");
    assert_eq!(cfg.telegram_bot_token.as_deref(), Some("123:abc"));
    clear_env();
}
