use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use datadoc_catalog::{
    assistant::{
        build_assistant_service,
        domain::model::{
            commands::ask_question_command::AskQuestionCommand,
            entities::conversation_state::{ConversationState, GREETING},
            enums::assistant_domain_error::AssistantDomainError,
        },
    },
    catalog::{
        CatalogServices, build_catalog_services,
        domain::model::entities::{
            table_metadata::TableMetadata, table_quality_report::TableQualityReport,
        },
    },
    config::app_config::AppConfig,
};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Schema metadata extraction and data quality profiling.
#[derive(Parser, Debug)]
#[command(name = "datadoc")]
#[command(about = "Catalog a relational schema and profile its data quality", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract table metadata and persist `{table}.json`
    Extract,
    /// Re-extract metadata, then profile every table and persist `{table}_quality.json`
    Analyze,
    /// List tables with persisted metadata
    Tables,
    /// Print the persisted metadata and quality report of one table
    Show {
        #[arg(value_name = "TABLE")]
        table: String,
    },
    /// Ask questions about the catalog interactively
    Chat,
}

#[derive(Serialize)]
struct ShowOutput {
    metadata: TableMetadata,
    quality: Option<TableQualityReport>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}

async fn run_chat(services: &CatalogServices) -> Result<(), String> {
    let assistant = build_assistant_service(services.facade.clone());
    let mut state = ConversationState::new();

    println!("{GREETING}");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            return Ok(());
        }

        let command = match AskQuestionCommand::new(line.to_string()) {
            Ok(command) => command,
            Err(AssistantDomainError::EmptyQuestion) => continue,
            Err(e) => return Err(e.to_string()),
        };

        match assistant.handle_ask(&mut state, command).await {
            Ok(answer) => println!("{answer}\n"),
            Err(e) => eprintln!("{e}"),
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), String> {
    let services = build_catalog_services(&config).map_err(|e| e.to_string())?;

    match cli.command {
        Commands::Extract => {
            let catalog = services
                .metadata_extraction_service
                .handle_extract()
                .await
                .map_err(|e| e.to_string())?;
            info!(tables = catalog.len(), "extraction finished");
            print_json(&catalog)
        }
        Commands::Analyze => {
            let reports = services
                .quality_analysis_service
                .handle_analyze()
                .await
                .map_err(|e| e.to_string())?;
            info!(tables = reports.len(), "quality analysis finished");
            print_json(&reports)
        }
        Commands::Tables => {
            let tables = services
                .query_service
                .handle_list_tables()
                .await
                .map_err(|e| e.to_string())?;
            for table in tables {
                println!("{table}");
            }
            Ok(())
        }
        Commands::Show { table } => {
            let snapshot = services
                .facade
                .table_snapshot(&table)
                .await
                .map_err(|e| e.to_string())?;
            if let Some(documentation) = &snapshot.documentation {
                info!(table = %table, bytes = documentation.len(), "documentation available");
            }
            print_json(&ShowOutput {
                metadata: snapshot.metadata,
                quality: snapshot.quality,
            })
        }
        Commands::Chat => run_chat(&services).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    info!(backend = ?config.database_backend, "starting datadoc");

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
