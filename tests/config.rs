use std::io::Write;
use std::time::Duration;

use bookshelf::cache::CacheBackend;
use bookshelf::config::{self, CliArgs, Command, LogFormat, ServeArgs, ServeOverrides};
use serial_test::serial;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".toml").expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn cli(config_file: &NamedTempFile, overrides: ServeOverrides) -> CliArgs {
    CliArgs {
        config_file: Some(config_file.path().to_path_buf()),
        command: Some(Command::Serve(ServeArgs { overrides })),
    }
}

#[test]
#[serial]
fn file_values_are_loaded() {
    let file = config_file(
        r#"
        [server]
        port = 9090

        [logging]
        json = true

        [cache]
        backend = "redis"
        redis_url = "redis://cache.internal:6379"
        redis_connect_timeout_ms = 250
        redis_response_timeout_ms = 100

        [books]
        max_payload_bytes = 2048
        "#,
    );

    let settings = config::load(&cli(&file, ServeOverrides::default())).expect("settings");
    assert_eq!(settings.server.addr.port(), 9090);
    assert!(matches!(settings.logging.format, LogFormat::Json));
    assert_eq!(settings.cache.backend, CacheBackend::Redis);
    assert_eq!(settings.cache.redis_url, "redis://cache.internal:6379");
    assert_eq!(settings.cache.redis_connect_timeout, Duration::from_millis(250));
    assert_eq!(settings.cache.redis_response_timeout, Duration::from_millis(100));
    assert_eq!(settings.books.max_payload_bytes.get(), 2048);
}

#[test]
#[serial]
fn environment_overrides_file_and_cli_overrides_environment() {
    let file = config_file(
        r#"
        [cache]
        backend = "memory"
        memory_capacity = 10
        "#,
    );

    // SAFETY: serialized with the other tests touching the environment.
    unsafe {
        std::env::set_var("BOOKSHELF__CACHE__MEMORY_CAPACITY", "20");
        std::env::set_var("BOOKSHELF__CACHE__BACKEND", "disabled");
    }

    let overrides = ServeOverrides {
        cache_backend: Some("memory".to_string()),
        ..Default::default()
    };
    let result = config::load(&cli(&file, overrides));

    unsafe {
        std::env::remove_var("BOOKSHELF__CACHE__MEMORY_CAPACITY");
        std::env::remove_var("BOOKSHELF__CACHE__BACKEND");
    }

    let settings = result.expect("settings");
    assert_eq!(settings.cache.memory_capacity.get(), 20);
    assert_eq!(settings.cache.backend, CacheBackend::Memory);
}

#[test]
#[serial]
fn invalid_file_values_are_reported() {
    let file = config_file(
        r#"
        [database]
        max_connections = 0
        "#,
    );

    let err = config::load(&cli(&file, ServeOverrides::default())).expect_err("invalid pool size");
    assert!(err.to_string().contains("database.max_connections"));
}
