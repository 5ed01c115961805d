//! Loading tilec.toml from disk

use std::fs;

use tile_core::config::CONFIG_FILE_NAME;
use tile_core::{compile_with_config, CompilerConfig, Error, OutputFormat};

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

    let config = CompilerConfig::from_file(&path).unwrap();
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.compile.keep_going);
}

#[test]
fn test_find_and_load_searches_parents() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[compile]\nkeep_going = false\n").unwrap();
    let nested = dir.path().join("tiles").join("alu");
    fs::create_dir_all(&nested).unwrap();

    let (config, found) = CompilerConfig::find_and_load(&nested).unwrap().unwrap();
    assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    assert!(!config.compile.keep_going);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CompilerConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_loaded_config_drives_compilation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[compile]\nkeep_going = false\nhonor_sync = true\n").unwrap();
    let config = CompilerConfig::from_file(&path).unwrap();

    let source = "module a { w0 -> n0; } module b { w0 sync -> e0; }";
    let compilation = compile_with_config(source, &config).unwrap();
    assert_eq!(compilation.modules.len(), 1);
    assert!(!compilation.is_ok());
}
