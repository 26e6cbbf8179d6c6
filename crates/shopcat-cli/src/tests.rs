use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["shopcat"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn crawl_defaults_to_all_stores() {
    let cli = Cli::try_parse_from(["shopcat", "crawl"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Crawl {
            store: None,
            url: None,
            output: None,
            browser_profile: false,
            resume: false,
            dry_run: false,
        })
    ));
}

#[test]
fn crawl_with_store_filter_and_flags() {
    let cli = Cli::try_parse_from([
        "shopcat",
        "crawl",
        "--store",
        "allbirds",
        "--output",
        "/tmp/catalogs",
        "--resume",
        "--browser-profile",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Crawl {
            store: Some(ref s),
            output: Some(ref o),
            resume: true,
            browser_profile: true,
            dry_run: false,
            ..
        }) if s == "allbirds" && o == &PathBuf::from("/tmp/catalogs")
    ));
}

#[test]
fn crawl_with_ad_hoc_url() {
    let cli =
        Cli::try_parse_from(["shopcat", "crawl", "--url", "https://shop.example", "--dry-run"])
            .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Crawl {
            url: Some(ref u),
            dry_run: true,
            ..
        }) if u == "https://shop.example"
    ));
}

#[test]
fn crawl_rejects_store_and_url_together() {
    let result = Cli::try_parse_from([
        "shopcat",
        "crawl",
        "--store",
        "allbirds",
        "--url",
        "https://shop.example",
    ]);
    assert!(result.is_err(), "--store and --url should conflict");
}

#[test]
fn storefront_with_store_filter() {
    let cli = Cli::try_parse_from(["shopcat", "storefront", "--store", "gymshark"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Storefront {
            store: Some(ref s),
            output: None,
            dry_run: false,
        }) if s == "gymshark"
    ));
}

#[test]
fn stats_collects_files_and_json_flag() {
    let cli = Cli::try_parse_from(["shopcat", "stats", "a.json", "b.json", "--json"]).unwrap();
    match cli.command {
        Some(Commands::Stats { files, json }) => {
            assert_eq!(files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
            assert!(json);
        }
        other => panic!("expected Stats, got {other:?}"),
    }
}

#[test]
fn stats_requires_at_least_one_file() {
    assert!(Cli::try_parse_from(["shopcat", "stats"]).is_err());
}
