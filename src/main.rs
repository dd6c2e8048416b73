use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::io::{self, Write, stderr};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};
use transaction_insights::application::engine::TransactionQueryEngine;
use transaction_insights::domain::ports::TransactionSourceBox;
use transaction_insights::infrastructure::file::FileTransactionSource;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transactions dataset (JSON array, or CSV when the extension is .csv)
    #[arg(long, env = "TRANSACTIONS_FILE")]
    data: PathBuf,

    /// Log verbosity written to stderr: off, error, warn, info, debug, trace
    #[arg(long, env = "TRANSACTIONS_LOG", default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    query: Query,
}

#[derive(Subcommand)]
enum Query {
    /// Sum of all transaction amounts
    TotalAmount,
    /// Sum of the amounts sent by one client
    TotalSentBy { name: String },
    /// Highest transaction amount
    MaxAmount,
    /// Number of distinct senders and beneficiaries
    UniqueClients,
    /// Whether a client has an unsolved compliance issue
    OpenCompliance { name: String },
    /// Transactions grouped by beneficiary name
    ByBeneficiary,
    /// Ids of all unsolved compliance issues
    UnsolvedIssues,
    /// Messages of all solved compliance issues
    SolvedMessages,
    /// The three largest distinct transfers
    Top3,
    /// The client with the greatest total sent amount
    TopSender,
    /// Every aggregate at once
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level);

    let source: TransactionSourceBox = Box::new(FileTransactionSource::new(cli.data));
    let engine = TransactionQueryEngine::new(source);

    let output = match cli.query {
        Query::TotalAmount => engine.total_amount().await.into_diagnostic()?.to_string(),
        Query::TotalSentBy { name } => engine
            .total_amount_sent_by(&name)
            .await
            .into_diagnostic()?
            .to_string(),
        Query::MaxAmount => engine.max_amount().await.into_diagnostic()?.to_string(),
        Query::UniqueClients => engine
            .count_unique_clients()
            .await
            .into_diagnostic()?
            .to_string(),
        Query::OpenCompliance { name } => engine
            .has_open_compliance_issue(&name)
            .await
            .into_diagnostic()?
            .to_string(),
        Query::ByBeneficiary => {
            let grouped = engine
                .transactions_by_beneficiary()
                .await
                .into_diagnostic()?;
            to_json(&grouped)?
        }
        Query::UnsolvedIssues => to_json(&engine.unsolved_issue_ids().await.into_diagnostic()?)?,
        Query::SolvedMessages => to_json(&engine.solved_issue_messages().await.into_diagnostic()?)?,
        Query::Top3 => to_json(&engine.top3_by_amount().await.into_diagnostic()?)?,
        Query::TopSender => engine.top_sender().await.into_diagnostic()?,
        Query::Summary => to_json(&engine.summary().await.into_diagnostic()?)?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).into_diagnostic()
}

fn setup_logging(level: LevelFilter) {
    // stdout carries query results, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}
