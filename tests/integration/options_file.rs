use std::fs;

use autoref::ConfigLoader;
use tempfile::TempDir;

use crate::integration::support::with_xdg_env;

#[test]
fn default_options_file_is_picked_up_from_config_home() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let dir = temp_dir.path().join("config/autoref");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("options.toml"),
            "[fields]\nreference = \"RefNo\"\n\n[output]\nmeta_folder = \"_catalogue\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.fields.reference, "RefNo");
        assert_eq!(config.fields.path, "FullName");
        assert_eq!(config.output.meta_folder, "_catalogue");
    });
}

#[test]
fn environment_overrides_options_file() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let path = temp_dir.path().join("options.toml");
        fs::write(&path, "[output]\noutput_suffix = \"_FromFile\"\n").unwrap();

        std::env::set_var("AUTOREF__OUTPUT__OUTPUT_SUFFIX", "_FromEnv");
        let config = ConfigLoader::load_from_file(&path);
        std::env::remove_var("AUTOREF__OUTPUT__OUTPUT_SUFFIX");

        assert_eq!(config.unwrap().output.output_suffix, "_FromEnv");
    });
}

#[test]
fn absent_default_options_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.output.output_suffix, "_AutoRef");
        assert_eq!(config.physical.level_field, "Level");
    });
}

#[test]
fn rendered_config_round_trips_through_toml() {
    let rendered = ConfigLoader::render(&ConfigLoader::default()).unwrap();
    assert!(rendered.contains("[fields]"));
    assert!(rendered.contains("Archive_Reference"));
    let parsed: autoref::CatalogueConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.fields.reference, "Archive_Reference");
}

#[test]
fn reserved_names_accept_a_comma_separated_variable() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        std::env::set_var("AUTOREF__OUTPUT__RESERVED_NAMES", "Thumbs.db,desktop.ini");
        let config = ConfigLoader::load();
        std::env::remove_var("AUTOREF__OUTPUT__RESERVED_NAMES");

        assert_eq!(
            config.unwrap().output.reserved_names,
            vec!["Thumbs.db".to_string(), "desktop.ini".to_string()]
        );
    });
}
