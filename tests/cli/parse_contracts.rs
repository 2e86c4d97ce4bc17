use std::path::PathBuf;

use autoref::export::OutputFormat;
use autoref::reference::{AccessionMode, SuffixTarget};
use autoref::tooling::cli::Cli;
use autoref::tree::filter::SortOrder;
use autoref::tree::keywords::KeywordMode;
use clap::Parser;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("autoref").chain(args.iter().copied()))
}

#[test]
fn short_aliases_match_long_flags() {
    let long = parse(&[
        "/data",
        "--accession",
        "all",
        "--acc-prefix",
        "A",
        "--start-ref",
        "3",
        "--delimiter",
        "-",
        "--skip",
        "--hidden",
        "--output-format",
        "json",
        "--fixity",
        "md5",
        "--keywords-mode",
        "firstletters",
    ])
    .unwrap();
    let short = parse(&[
        "/data", "--acc", "all", "--accp", "A", "--str", "3", "--dlm", "-", "--skp", "--hid",
        "--fmt", "json", "--fx", "md5", "--keym", "firstletters",
    ])
    .unwrap();

    for cli in [&long, &short] {
        assert_eq!(cli.accession, Some(AccessionMode::All));
        assert_eq!(cli.acc_prefix.as_deref(), Some("A"));
        assert_eq!(cli.start_ref, 3);
        assert_eq!(cli.delimiter.as_deref(), Some("-"));
        assert!(cli.skip);
        assert!(cli.hidden);
        assert_eq!(cli.output_format, OutputFormat::Json);
        assert_eq!(cli.keywords_mode, KeywordMode::FirstLetters);
    }
}

#[test]
fn single_letter_flags_parse() {
    let cli = parse(&["/data", "-p", "PFX", "-s", "x", "-o", "/out", "-l", "2", "-f", "csv", "-v"]).unwrap();
    assert_eq!(cli.prefix.as_deref(), Some("PFX"));
    assert_eq!(cli.suffix.as_deref(), Some("x"));
    assert_eq!(cli.output, Some(PathBuf::from("/out")));
    assert_eq!(cli.level_limit, Some(2));
    assert_eq!(cli.output_format, OutputFormat::Csv);
    assert!(cli.verbose);
}

#[test]
fn enumerated_values_parse() {
    let cli = parse(&[
        "/data",
        "--suffix-option",
        "apply_to_both",
        "--sort-by",
        "alphabetical",
        "--keywords-mode",
        "from_json",
    ])
    .unwrap();
    assert_eq!(cli.suffix_option, SuffixTarget::Both);
    assert_eq!(cli.sort_by, SortOrder::Alphabetical);
    assert_eq!(cli.keywords_mode, KeywordMode::FromJson);
}

#[test]
fn negative_start_reference_is_accepted() {
    let cli = parse(&["/data", "--start-ref", "-2"]).unwrap();
    assert_eq!(cli.start_ref, -2);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(parse(&["/data", "--output-format", "ods"]).is_err());
    assert!(parse(&["/data", "--fixity", "crc32"]).is_err());
    assert!(parse(&["/data", "--accession", "everything"]).is_err());
    assert!(parse(&["/data", "--level-limit", "deep"]).is_err());
    assert!(parse(&["/data", "--start-ref", "one"]).is_err());
}

#[test]
fn empty_log_toggle_requires_prune() {
    assert!(parse(&["/data", "--no-empty-log"]).is_err());
    let options = parse(&["/data", "--rm-empty", "--no-empty-log"])
        .unwrap()
        .generator_options()
        .unwrap();
    assert!(options.remove_empty);
    assert!(!options.prune_log);
}

#[test]
fn generator_options_reject_empty_delimiter() {
    let cli = parse(&["/data", "--delimiter", ""]).unwrap();
    assert!(cli.generator_options().is_err());
}

#[test]
fn missing_root_defaults_to_current_directory() {
    let cli = parse(&["-f", "csv"]).unwrap();
    let options = cli.generator_options().unwrap();
    assert_eq!(options.root, std::env::current_dir().unwrap());
}
