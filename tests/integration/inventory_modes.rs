use std::fs;

use autoref::export::OutputFormat;
use autoref::generator::RunMode;
use autoref::{CatalogueConfig, CatalogueError, GeneratorOptions, ReferenceGenerator};
use tempfile::TempDir;

use crate::integration::support::read_csv_rows;

fn inventory_options(temp_dir: &TempDir) -> GeneratorOptions {
    let mut options = GeneratorOptions::new(temp_dir.path());
    options.format = OutputFormat::Csv;
    options
}

#[test]
fn physical_mode_numbers_rows_from_declared_levels() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("inventory.csv");
    fs::write(
        &input,
        "Level,Title\n\
         Collection,Smith Papers\n\
         Section,Letters\n\
         Series,Outgoing\n\
         Item,Letter 1\n\
         Item,Letter 2\n\
         Section,Accounts\n",
    )
    .unwrap();

    let mut options = inventory_options(&temp_dir);
    options.physical_input = Some(input.clone());
    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.mode, RunMode::Physical);
    assert_eq!(report.rows, 6);
    assert_eq!(report.output_file, temp_dir.path().join("inventory_AutoRef.csv"));

    let refs: Vec<String> = read_csv_rows(&report.output_file)
        .into_iter()
        .map(|row| row["Archive_Reference"].clone())
        .collect();
    assert_eq!(
        refs,
        vec![
            "Smith Papers",
            "Smith Papers/1",
            "Smith Papers/1/1",
            "Smith Papers/1/1/1",
            "Smith Papers/1/1/2",
            "Smith Papers/2",
        ]
    );
}

#[test]
fn physical_mode_requires_a_level_column() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("inventory.csv");
    fs::write(&input, "Title\nSmith Papers\n").unwrap();

    let mut options = inventory_options(&temp_dir);
    options.physical_input = Some(input);
    let err = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap_err();
    assert!(matches!(err, CatalogueError::Input { .. }));
}

#[test]
fn sort_mode_orders_rows_by_hierarchy() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("listing.csv");
    fs::write(
        &input,
        "Title,Archive_Reference\n\
         tenth,PFX/1/10\n\
         second,PFX/1/2\n\
         top,PFX\n\
         first,PFX/1\n\
         other,PFX/2\n",
    )
    .unwrap();

    let mut options = inventory_options(&temp_dir);
    options.sort_input = Some(input);
    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();

    assert_eq!(report.mode, RunMode::Sort);
    let titles: Vec<String> = read_csv_rows(&report.output_file)
        .into_iter()
        .map(|row| row["Title"].clone())
        .collect();
    assert_eq!(titles, vec!["top", "first", "second", "tenth", "other"]);
}

#[cfg(feature = "xlsx")]
#[test]
fn sort_mode_reads_xlsx_listings() {
    use autoref::export::xlsx::XlsxRenderer;
    use autoref::export::{CatalogueTable, Cell, Renderer};

    let temp_dir = TempDir::new().unwrap();
    let mut listing = CatalogueTable::new(vec!["Title".to_string(), "Archive_Reference".to_string()]);
    for (title, reference) in [("tenth", "PFX/1/10"), ("top", "PFX"), ("second", "PFX/1/2"), ("first", "PFX/1")] {
        listing.rows.push(vec![Cell::text(title), Cell::text(reference)]);
    }
    let input = temp_dir.path().join("listing.xlsx");
    fs::write(&input, XlsxRenderer.render(&listing).unwrap()).unwrap();

    let mut options = inventory_options(&temp_dir);
    options.sort_input = Some(input);
    let report = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();

    let titles: Vec<String> = read_csv_rows(&report.output_file)
        .into_iter()
        .map(|row| row["Title"].clone())
        .collect();
    assert_eq!(titles, vec!["top", "first", "second", "tenth"]);
}

#[cfg(feature = "xlsx")]
#[test]
fn physical_xlsx_output_feeds_sort_mode() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("boxes.csv");
    fs::write(&input, "Level,Title\nCollection,HS\nSection,Minutes\nItem,Volume 1\n").unwrap();

    let mut options = GeneratorOptions::new(temp_dir.path());
    options.physical_input = Some(input);
    let physical = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();
    assert_eq!(physical.output_file, temp_dir.path().join("boxes_AutoRef.xlsx"));

    let mut options = inventory_options(&temp_dir);
    options.sort_input = Some(physical.output_file.clone());
    let sorted = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap();

    assert_eq!(sorted.rows, 3);
    let refs: Vec<String> = read_csv_rows(&sorted.output_file)
        .into_iter()
        .map(|row| row["Archive_Reference"].clone())
        .collect();
    assert_eq!(refs, vec!["HS", "HS/1", "HS/1/1"]);
}

#[test]
fn inventory_inputs_need_a_known_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("listing.txt");
    fs::write(&input, "Title,Archive_Reference\n").unwrap();

    let mut options = inventory_options(&temp_dir);
    options.sort_input = Some(input);
    let err = ReferenceGenerator::new(options, CatalogueConfig::default())
        .run()
        .unwrap_err();
    assert!(matches!(err, CatalogueError::Input { .. }));
}
