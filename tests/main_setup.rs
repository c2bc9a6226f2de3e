use ebms_gateway::{
    AppConfig,
    config::{ConfigError, Env, LOCAL_JWT_SECRET, MAX_TOKEN_TTL_SECS},
};
use serial_test::serial;
use std::{env, panic, path::PathBuf};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 6] = [
    "APP_ENV",
    "JWT_SECRET",
    "JWT_EXPIRES_IN",
    "PORT",
    "FRONTEND_URL",
    "EBMS_ROUTES_FILE",
];

/// Runs `test` with exactly `vars` set among the config variables, then
/// restores whatever the process had before.
fn run_with_env<T, R>(vars: &[(&'static str, &str)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    // Run the test
    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(key, val);
            } else {
                env::remove_var(key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

const PRODUCTION_SECRET: &str = "0123456789abcdef0123456789abcdef-prod";

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(&[("APP_ENV", "production")], AppConfig::load);

    assert!(
        matches!(result, Err(ConfigError::Missing("JWT_SECRET"))),
        "Production config loading should fail on a missing secret"
    );
}

#[test]
#[serial]
fn test_app_config_production_rejects_short_secret() {
    let result = run_with_env(
        &[("APP_ENV", "production"), ("JWT_SECRET", "too-short")],
        AppConfig::load,
    );

    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            name: "JWT_SECRET",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_app_config_production_with_secret() {
    let config = run_with_env(
        &[
            ("APP_ENV", "production"),
            ("JWT_SECRET", PRODUCTION_SECRET),
            ("PORT", "8080"),
            ("FRONTEND_URL", "https://dashboard.ebms.com"),
            ("EBMS_ROUTES_FILE", "/etc/ebms/routes.json"),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.jwt_secret, PRODUCTION_SECRET);
    assert_eq!(config.port, 8080);
    assert_eq!(config.frontend_url, "https://dashboard.ebms.com");
    assert_eq!(
        config.routes_file,
        Some(PathBuf::from("/etc/ebms/routes.json"))
    );
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    // Local mode falls back to development defaults for everything.
    let config = run_with_env(&[("APP_ENV", "local")], AppConfig::load).unwrap();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.jwt_secret, LOCAL_JWT_SECRET);
    assert_eq!(config.token_ttl_secs, 86_400);
    assert_eq!(config.port, 5000);
    assert_eq!(config.frontend_url, "http://localhost:3000");
    assert_eq!(config.routes_file, None);
}

#[test]
#[serial]
fn test_unset_app_env_means_local() {
    let config = run_with_env(&[], AppConfig::load).unwrap();
    assert_eq!(config.env, Env::Local);
}

#[test]
#[serial]
fn test_numeric_variables_must_parse() {
    let result = run_with_env(&[("PORT", "not-a-port")], AppConfig::load);
    assert!(matches!(result, Err(ConfigError::Invalid { name: "PORT", .. })));

    let result = run_with_env(&[("JWT_EXPIRES_IN", "0")], AppConfig::load);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            name: "JWT_EXPIRES_IN",
            ..
        })
    ));

    let config = run_with_env(&[("JWT_EXPIRES_IN", "3600")], AppConfig::load).unwrap();
    assert_eq!(config.token_ttl_secs, 3600);
}

#[test]
#[serial]
fn test_token_lifetime_has_an_upper_bound() {
    let too_long = (MAX_TOKEN_TTL_SECS + 1).to_string();
    let result = run_with_env(&[("JWT_EXPIRES_IN", too_long.as_str())], AppConfig::load);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            name: "JWT_EXPIRES_IN",
            ..
        })
    ));

    let result = run_with_env(
        &[("JWT_EXPIRES_IN", "9223372036854775807")],
        AppConfig::load,
    );
    assert!(result.is_err());

    let longest = MAX_TOKEN_TTL_SECS.to_string();
    let config = run_with_env(&[("JWT_EXPIRES_IN", longest.as_str())], AppConfig::load).unwrap();
    assert_eq!(config.token_ttl_secs, MAX_TOKEN_TTL_SECS);
}

#[test]
#[serial]
fn test_fallback_secret_is_reported() {
    let config = run_with_env(&[], AppConfig::load).unwrap();
    assert!(config.uses_fallback_secret());

    let config = run_with_env(
        &[("APP_ENV", "production"), ("JWT_SECRET", PRODUCTION_SECRET)],
        AppConfig::load,
    )
    .unwrap();
    assert!(!config.uses_fallback_secret());
}
