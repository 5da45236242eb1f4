use anyhow::{Context, Result, bail};
use clap::Parser;
use dbr_cli::{
    Cli, Inspector, JsonPresenter, OutputFormat, Presenter, TextPresenter, dotenv_failure,
    setup_logging,
};
use dbr_core::{DatabaseConnector, ReaderConfig};
use dbr_postgres::PostgresConnector;
use tracing::{error, warn};

#[tokio::main]
async fn main() {
    // Values from .env feed the DB_* environment fallbacks of the CLI
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Some(e) = dotenv_failure(dotenv) {
        warn!(error = %e, "Failed to load .env file");
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let file_config = ReaderConfig::load_from(cli.config.as_deref())?;
    let settings = file_config.connection.merged_with(cli.connection_overrides());

    let missing = settings.missing_required();
    if !missing.is_empty() {
        bail!(
            "Missing connection settings: {} (set DB_USER, DB_HOST and DB_NAME, pass flags, or add them to dbreader.toml)",
            missing.join(", ")
        );
    }

    let params = settings.to_params();

    let mut connector = PostgresConnector::new();
    if let Some(timeout) = settings.connect_timeout() {
        connector = connector.with_connect_timeout(timeout);
    }

    connector
        .connect(&params)
        .await
        .context("An error occurred connecting to the database")?;

    let presenter: Box<dyn Presenter> = match cli.format {
        OutputFormat::Text => Box::new(TextPresenter),
        OutputFormat::Json => Box::new(JsonPresenter),
    };

    let inspector = Inspector::new(&connector, presenter.as_ref(), &params.schema);
    let mut stdout = std::io::stdout();

    let result = async {
        inspector
            .start(&params.database, &mut stdout)
            .await
            .context("An error occurred obtaining tables list")?;

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        inspector.run(stdin, &mut stdout).await
    }
    .await;

    if let Err(e) = connector.disconnect().await {
        tracing::warn!(error = %e, "Failed to close database connection");
    }

    result
}
