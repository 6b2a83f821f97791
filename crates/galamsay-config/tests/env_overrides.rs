//! Environment variable precedence, sandboxed with `figment::Jail`.

use figment::Jail;
use galamsay_config::GalamsayConfig;
use pretty_assertions::assert_eq;

#[test]
fn sectioned_env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("GALAMSAY_DATA__CSV_PATH", "env.csv");
        jail.set_env("GALAMSAY_DATABASE__PATH", "env.db");
        jail.set_env("GALAMSAY_ANALYSIS__DEFAULT_THRESHOLD", "42");
        jail.set_env("GALAMSAY_GENERAL__DEFAULT_LIMIT", "7");

        let config = GalamsayConfig::load().expect("config loads");
        assert_eq!(config.data.csv_path, "env.csv");
        assert_eq!(config.database.path, "env.db");
        assert_eq!(config.analysis.default_threshold, 42);
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

#[test]
fn short_form_path_vars_are_honoured() {
    Jail::expect_with(|jail| {
        jail.set_env("GALAMSAY_DATA_FILE", "short.csv");
        jail.set_env("GALAMSAY_DB_PATH", "short.db");

        let config = GalamsayConfig::load().expect("config loads");
        assert_eq!(config.data.csv_path, "short.csv");
        assert_eq!(config.database.path, "short.db");
        Ok(())
    });
}

#[test]
fn sectioned_var_beats_short_form() {
    Jail::expect_with(|jail| {
        jail.set_env("GALAMSAY_DB_PATH", "short.db");
        jail.set_env("GALAMSAY_DATABASE__PATH", "sectioned.db");

        let config = GalamsayConfig::load().expect("config loads");
        assert_eq!(config.database.path, "sectioned.db");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "galamsay.toml",
            r#"
[analysis]
default_threshold = 5
"#,
        )?;
        jail.set_env("GALAMSAY_ANALYSIS__DEFAULT_THRESHOLD", "20");

        let config = GalamsayConfig::load().expect("config loads");
        assert_eq!(config.analysis.default_threshold, 20);
        Ok(())
    });
}

#[test]
fn log_filter_var_does_not_disturb_config() {
    Jail::expect_with(|jail| {
        jail.set_env("GALAMSAY_LOG", "debug");

        let config = GalamsayConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 100);
        Ok(())
    });
}
