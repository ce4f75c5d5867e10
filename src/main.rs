use clap::Parser;
use roundtrip_testkit::utils::error::ErrorCategory;
use roundtrip_testkit::utils::{logger, validation::Validate};
use roundtrip_testkit::{verify_with_codec, CliConfig, DocumentFormat, TestkitConfig, TestkitError};
use std::convert::Infallible;

fn check(cli: &CliConfig, config: &TestkitConfig, text: &str) -> Result<String, TestkitError> {
    let accept_json = |_: &serde_json::Value| Ok::<(), Infallible>(());
    let compare = config.compare_original_text;
    match cli.format {
        DocumentFormat::Json => verify_with_codec(&config.json_codec(), text, accept_json, compare),
        DocumentFormat::JsonValue => {
            verify_with_codec(&config.json_value_codec(), text, accept_json, compare)
        }
        DocumentFormat::Toml => verify_with_codec(
            &config.toml_codec(),
            text,
            |_: &toml::Table| Ok::<(), Infallible>(()),
            compare,
        ),
    }
}

fn run(cli: &CliConfig) -> Result<String, TestkitError> {
    let config = cli.testkit_config()?;
    config.validate()?;
    tracing::debug!("Effective config: {:?}", config);

    let text = std::fs::read_to_string(&cli.file)?;
    check(cli, &config, &text)
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Checking {} as {:?}", cli.file.display(), cli.format);

    match run(&cli) {
        Ok(stable_text) => {
            println!("{}", stable_text);
            tracing::info!("✅ {} is round-trip stable", cli.file.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Round trip failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.category() {
                ErrorCategory::RoundTrip => 1,
                ErrorCategory::Codec => 2,
                ErrorCategory::Configuration | ErrorCategory::Io => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
