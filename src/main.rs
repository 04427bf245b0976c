use anyhow::Context;
use clap::Parser;
use shopify_gql::config::Command;
use shopify_gql::core::GraphqlTransport;
use shopify_gql::utils::error::ErrorSeverity;
use shopify_gql::utils::{logger, validation::Validate};
use shopify_gql::{
    classify_response, ClassificationReport, ClassifiedResponse, CliConfig, LocalFiles,
    OutcomeKind, ShopifyClient, ShopifyError, TomlConfig,
};

fn exit_code_for_kind(kind: OutcomeKind) -> i32 {
    match kind {
        k if k.is_success() => 0,
        OutcomeKind::Unknown => 3,
        _ => 2,
    }
}

fn exit_code_for_error(error: &ShopifyError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report_error(error: &ShopifyError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(exit_code_for_error(error));
}

async fn run(command: Command) -> Result<(u16, ClassifiedResponse), ShopifyError> {
    let files = LocalFiles::new(".");

    match command {
        Command::Classify {
            file,
            status,
            envelope,
        } => {
            tracing::info!("📁 Classifying saved response: {}", file.display());
            let response = files.read_response(&file, status, envelope)?;
            Ok((response.http_status, classify_response(&response)))
        }
        Command::Query {
            config,
            query_file,
            variables,
            operation_name,
        } => {
            tracing::info!("📁 Loading configuration from: {}", config.display());
            let config = TomlConfig::from_file(&config)?;
            config.validate()?;

            let request = files.read_request(
                &query_file,
                variables.as_deref(),
                operation_name.as_deref(),
            )?;

            let client = ShopifyClient::new(config)?;
            let response = client.send(&request).await?;
            Ok((response.http_status, classify_response(&response)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let (http_status, classified) = match run(config.command).await {
        Ok(result) => result,
        Err(e) => report_error(&e),
    };

    let kind = classified.kind();
    tracing::info!("Classified as {} (HTTP {})", kind, http_status);
    if !kind.is_success() {
        tracing::warn!("💡 {}", kind.recovery_hint());
    }

    let report = ClassificationReport::new(http_status, &classified);
    let rendered =
        serde_json::to_string_pretty(&report).context("failed to render classification report")?;
    println!("{}", rendered);

    let code = exit_code_for_kind(kind);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
