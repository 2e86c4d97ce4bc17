use std::fs;

use autoref::export::OutputFormat;
use autoref::tree::keywords::{KeywordMode, KeywordOptions};
use autoref::{CatalogueConfig, CatalogueError, GeneratorOptions, ReferenceGenerator};
use tempfile::TempDir;

use crate::integration::support::{build_tree, references_by_name};

fn correspondence(temp_dir: &TempDir) -> std::path::PathBuf {
    build_tree(
        temp_dir.path(),
        "papers",
        &[
            "Accounts/ledger.txt",
            "John Smith/letter.txt",
            "Minutes/m.txt",
            "index.txt",
        ],
    )
}

fn keyword_options(keywords: &[&str], mode: KeywordMode, retain_order: bool) -> KeywordOptions {
    KeywordOptions {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        mode,
        retain_order,
        case_sensitive: false,
        abbreviation: None,
    }
}

fn run(root: &std::path::Path, keywords: KeywordOptions) -> Vec<(String, String)> {
    let mut options = GeneratorOptions::new(root);
    options.format = OutputFormat::Csv;
    options.keywords = Some(keywords);
    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();
    references_by_name(&report.output_file)
}

fn reference_of<'a>(refs: &'a [(String, String)], name: &str) -> &'a str {
    refs.iter()
        .find(|(n, _)| n == name)
        .map(|(_, r)| r.as_str())
        .unwrap()
}

#[test]
fn keyword_folder_does_not_consume_a_number() {
    let temp_dir = TempDir::new().unwrap();
    let root = correspondence(&temp_dir);

    let refs = run(&root, keyword_options(&["John Smith"], KeywordMode::Initialise, false));

    assert_eq!(reference_of(&refs, "Accounts"), "1");
    assert_eq!(reference_of(&refs, "John Smith"), "JS");
    assert_eq!(reference_of(&refs, "letter"), "JS/1");
    assert_eq!(reference_of(&refs, "Minutes"), "2");
    assert_eq!(reference_of(&refs, "m"), "2/1");
    assert_eq!(reference_of(&refs, "index"), "3");
}

#[test]
fn retained_order_keeps_numbering_contiguous() {
    let temp_dir = TempDir::new().unwrap();
    let root = correspondence(&temp_dir);

    let refs = run(&root, keyword_options(&["John Smith"], KeywordMode::Initialise, true));

    assert_eq!(reference_of(&refs, "John Smith"), "JS");
    assert_eq!(reference_of(&refs, "Minutes"), "3");
    assert_eq!(reference_of(&refs, "index"), "4");
}

#[test]
fn matching_ignores_case_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let root = correspondence(&temp_dir);

    let refs = run(&root, keyword_options(&["john smith"], KeywordMode::FirstLetters, false));

    assert_eq!(reference_of(&refs, "John Smith"), "JOH");
    assert_eq!(reference_of(&refs, "Minutes"), "2");
}

#[test]
fn empty_keyword_list_abbreviates_every_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = correspondence(&temp_dir);

    let refs = run(&root, keyword_options(&[], KeywordMode::Initialise, false));

    assert_eq!(reference_of(&refs, "Accounts"), "ACC");
    assert_eq!(reference_of(&refs, "ledger"), "ACC/1");
    assert_eq!(reference_of(&refs, "Minutes"), "MIN");
    assert_eq!(reference_of(&refs, "index"), "1");
}

#[test]
fn json_mapping_supplies_tokens() {
    let temp_dir = TempDir::new().unwrap();
    let root = correspondence(&temp_dir);
    let mapping = temp_dir.path().join("keywords.json");
    fs::write(&mapping, r#"{"Minutes": "MIN", "Accounts": 42}"#).unwrap();

    let refs = run(
        &root,
        keyword_options(&[mapping.to_str().unwrap()], KeywordMode::FromJson, false),
    );

    assert_eq!(reference_of(&refs, "Accounts"), "42");
    assert_eq!(reference_of(&refs, "John Smith"), "1");
    assert_eq!(reference_of(&refs, "Minutes"), "MIN");
    assert_eq!(reference_of(&refs, "m"), "MIN/1");
}

#[test]
fn json_mapping_must_be_an_object() {
    let temp_dir = TempDir::new().unwrap();
    let root = correspondence(&temp_dir);
    let mapping = temp_dir.path().join("keywords.json");
    fs::write(&mapping, r#"["Minutes"]"#).unwrap();

    let mut options = GeneratorOptions::new(&root);
    options.format = OutputFormat::Csv;
    options.keywords = Some(keyword_options(
        &[mapping.to_str().unwrap()],
        KeywordMode::FromJson,
        false,
    ));
    let err = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap_err();

    assert!(matches!(err, CatalogueError::Keyword { .. }));
    assert!(!root.join("meta").exists());
}
