use super::*;

#[test]
fn parses_scrape_with_url_and_output() {
    let cli = Cli::try_parse_from([
        "menuscrape",
        "scrape",
        "--url",
        "https://store.example/store/42",
        "--output",
        "out.json",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Scrape { url, output } => {
            assert_eq!(url.as_deref(), Some("https://store.example/store/42"));
            assert_eq!(output, Some(PathBuf::from("out.json")));
        }
        Commands::Extract { .. } => panic!("expected scrape"),
    }
}

#[test]
fn scrape_flags_are_optional() {
    let cli = Cli::try_parse_from(["menuscrape", "scrape"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Scrape {
            url: None,
            output: None
        }
    ));
}

#[test]
fn extract_requires_html() {
    assert!(Cli::try_parse_from(["menuscrape", "extract"]).is_err());
}

#[test]
fn parses_extract_command() {
    let cli = Cli::try_parse_from(["menuscrape", "extract", "--html", "page.html"])
        .expect("expected valid cli args");

    match cli.command {
        Commands::Extract { html, output } => {
            assert_eq!(html, PathBuf::from("page.html"));
            assert!(output.is_none());
        }
        Commands::Scrape { .. } => panic!("expected extract"),
    }
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["menuscrape"]).is_err());
}

#[test]
fn help_is_rendered_by_the_parser() {
    let err = Cli::try_parse_from(["menuscrape", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn resolve_selectors_defaults_without_override_path() {
    let config = AppConfig {
        store_url: None,
        output_path: PathBuf::from("restaurant_detail.json"),
        log_level: "info".to_owned(),
        selectors_path: None,
        browser: menuscrape_core::BrowserSettings {
            headless: true,
            window_width: 1024,
            window_height: 1024,
        },
        pacing: menuscrape_core::Pacing::default(),
    };
    assert_eq!(resolve_selectors(&config).unwrap(), Selectors::default());
}
