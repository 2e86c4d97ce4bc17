use autoref::export::OutputFormat;
use autoref::reference::SuffixTarget;
use autoref::{CatalogueConfig, GeneratorOptions, ReferenceGenerator};
use tempfile::TempDir;

use crate::integration::support::{references_by_name, sample_archive};

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(name, reference)| (name.to_string(), reference.to_string()))
        .collect()
}

fn csv_options(root: &std::path::Path) -> GeneratorOptions {
    let mut options = GeneratorOptions::new(root);
    options.format = OutputFormat::Csv;
    options
}

#[test]
fn catalogue_lists_tree_in_pre_order_with_hierarchical_references() {
    let temp_dir = TempDir::new().unwrap();
    let root = sample_archive(&temp_dir);

    let report = ReferenceGenerator::new(csv_options(&root), CatalogueConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.rows, 8);
    assert_eq!(report.directories, 4);
    assert_eq!(report.files, 4);
    assert!(report.output_file.ends_with("meta/root_AutoRef.csv"));
    assert_eq!(
        references_by_name(&report.output_file),
        pairs(&[
            ("root", "0"),
            ("Accounts", "1"),
            ("2020", "1/1"),
            ("budget", "1/1/1"),
            ("ledger", "1/2"),
            ("Letters", "2"),
            ("a", "2/1"),
            ("readme", "3"),
        ])
    );
}

#[test]
fn prefix_delimiter_and_start_reference_shape_every_row() {
    let temp_dir = TempDir::new().unwrap();
    let root = sample_archive(&temp_dir);
    let mut options = csv_options(&root);
    options.reference.prefix = Some("ARC".to_string());
    options.reference.delimiter = ".".to_string();
    options.reference.start_ref = 5;

    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();

    assert_eq!(
        references_by_name(&report.output_file),
        pairs(&[
            ("root", "ARC"),
            ("Accounts", "ARC.5"),
            ("2020", "ARC.5.1"),
            ("budget", "ARC.5.1.1"),
            ("ledger", "ARC.5.2"),
            ("Letters", "ARC.6"),
            ("a", "ARC.6.1"),
            ("readme", "ARC.7"),
        ])
    );
}

#[test]
fn level_limit_blanks_deeper_segments() {
    let temp_dir = TempDir::new().unwrap();
    let root = sample_archive(&temp_dir);
    let mut options = csv_options(&root);
    options.reference.level_limit = Some(1);

    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();
    let refs = references_by_name(&report.output_file);

    assert_eq!(refs[2], ("2020".to_string(), "1".to_string()));
    assert_eq!(refs[3], ("budget".to_string(), "1".to_string()));
    assert_eq!(refs[7], ("readme".to_string(), "3".to_string()));
}

#[test]
fn suffix_applies_only_to_selected_kind() {
    let temp_dir = TempDir::new().unwrap();
    let root = sample_archive(&temp_dir);
    let mut options = csv_options(&root);
    options.reference.suffix = Some("F".to_string());
    options.reference.suffix_target = SuffixTarget::Files;

    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();
    let refs = references_by_name(&report.output_file);

    assert_eq!(refs[1].1, "1");
    assert_eq!(refs[4].1, "1/2F");
    assert_eq!(refs[7].1, "3F");
}

#[test]
fn parent_reference_column_holds_parent_token() {
    let temp_dir = TempDir::new().unwrap();
    let root = sample_archive(&temp_dir);

    let report = ReferenceGenerator::new(csv_options(&root), CatalogueConfig::default())
        .run()
        .unwrap();
    let rows = crate::integration::support::read_csv_rows(&report.output_file);

    let by_name = |name: &str| rows.iter().find(|r| r["Basename"] == name).unwrap();
    assert_eq!(by_name("root")["Parent_Ref"], "0");
    assert_eq!(by_name("Accounts")["Parent_Ref"], "0");
    assert_eq!(by_name("budget")["Parent_Ref"], "1");
    assert_eq!(by_name("budget")["Ref_Section"], "1");
    assert_eq!(by_name("budget")["Level"], "3");
}

#[test]
fn rerunning_overwrites_catalogue_without_listing_it() {
    let temp_dir = TempDir::new().unwrap();
    let root = sample_archive(&temp_dir);
    let generator = ReferenceGenerator::new(csv_options(&root), CatalogueConfig::default());

    let first = generator.run().unwrap();
    let second = generator.run().unwrap();

    assert_eq!(first.output_file, second.output_file);
    assert_eq!(second.rows, 8);
    assert_eq!(
        references_by_name(&first.output_file),
        references_by_name(&second.output_file)
    );
}

#[test]
fn hidden_entries_are_included_only_on_request() {
    let temp_dir = TempDir::new().unwrap();
    let root = sample_archive(&temp_dir);
    std::fs::write(root.join(".hidden"), "h").unwrap();

    let report = ReferenceGenerator::new(csv_options(&root), CatalogueConfig::default())
        .run()
        .unwrap();
    assert_eq!(report.rows, 8);

    let mut options = csv_options(&root);
    options.show_hidden = true;
    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();
    assert_eq!(report.rows, 9);
}

#[test]
fn missing_root_is_reported_before_any_output() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("absent");

    let err = ReferenceGenerator::new(csv_options(&root), CatalogueConfig::default())
        .run()
        .unwrap_err();
    assert!(err.to_string().contains("absent"));
    assert!(!root.exists());
}
