use std::fs;

use autoref::export::OutputFormat;
use autoref::{CatalogueConfig, CatalogueError, GeneratorOptions, ReferenceGenerator};
use tempfile::TempDir;

use crate::integration::support::{build_tree, references_by_name, Answer};

fn cluttered(temp_dir: &TempDir) -> std::path::PathBuf {
    build_tree(
        temp_dir.path(),
        "root",
        &["Empty/", "Nested/Deeper/", "Kept/report.txt", "notes.txt"],
    )
}

fn prune_options(root: &std::path::Path) -> GeneratorOptions {
    let mut options = GeneratorOptions::new(root);
    options.format = OutputFormat::Csv;
    options.remove_empty = true;
    options
}

#[test]
fn confirmed_prune_removes_empty_directories_before_cataloguing() {
    let temp_dir = TempDir::new().unwrap();
    let root = cluttered(&temp_dir);

    let report = ReferenceGenerator::new(prune_options(&root), CatalogueConfig::default())
        .with_confirmation(Box::new(Answer(true)))
        .run()
        .unwrap();

    assert_eq!(report.pruned, 3);
    assert!(!root.join("Empty").exists());
    assert!(!root.join("Nested").exists());
    assert_eq!(
        references_by_name(&report.output_file)
            .into_iter()
            .map(|(name, reference)| format!("{}={}", name, reference))
            .collect::<Vec<_>>(),
        vec!["root=0", "Kept=1", "report=1/1", "notes=2"]
    );

    let log = fs::read_to_string(root.join("meta/root_EmptyDirectoriesRemoved.txt")).unwrap();
    assert_eq!(log.lines().count(), 3);
    assert!(log.contains("Deeper"));
}

#[test]
fn declined_prune_aborts_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let root = cluttered(&temp_dir);

    let err = ReferenceGenerator::new(prune_options(&root), CatalogueConfig::default())
        .with_confirmation(Box::new(Answer(false)))
        .run()
        .unwrap_err();

    assert!(matches!(err, CatalogueError::Aborted));
    assert!(root.join("Empty").exists());
    assert!(root.join("Nested/Deeper").exists());
    assert!(!root.join("meta").exists());
}

#[test]
fn nothing_to_prune_writes_no_log() {
    let temp_dir = TempDir::new().unwrap();
    let root = build_tree(temp_dir.path(), "root", &["Kept/report.txt"]);

    let report = ReferenceGenerator::new(prune_options(&root), CatalogueConfig::default())
        .with_confirmation(Box::new(Answer(true)))
        .run()
        .unwrap();

    assert_eq!(report.pruned, 0);
    assert!(!root.join("meta/root_EmptyDirectoriesRemoved.txt").exists());
}

#[test]
fn prune_log_can_be_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let root = cluttered(&temp_dir);
    let mut options = prune_options(&root);
    options.prune_log = false;

    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .with_confirmation(Box::new(Answer(true)))
        .run()
        .unwrap();

    assert_eq!(report.pruned, 3);
    assert!(!root.join("meta/root_EmptyDirectoriesRemoved.txt").exists());
}
