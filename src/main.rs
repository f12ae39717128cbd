use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tplsync::presentation::report::{self, StdinPrompt};
use tplsync::{AppConfig, RowId, SyncOutcome, SyncRequest};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Debug)]
#[command(
    name = "tplsync",
    about = "tplsync: compare a database JSON template with a file, then sync it."
)]
struct Cli {
    /// Path to the JSON template file
    file: PathBuf,

    /// Config section naming the target database
    section: String,

    /// Primary key of the template row
    row_id: i64,

    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tplsync=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = AppConfig::load(&cli.config)?;
    let request = SyncRequest {
        file_path: cli.file,
        section: cli.section,
        row_id: RowId(cli.row_id),
    };

    let mut prompt = StdinPrompt::new();
    match tplsync::run(&cfg, &request, &mut prompt).await? {
        SyncOutcome::InSync => report::print_in_sync(),
        SyncOutcome::Updated(id) => report::print_updated(id),
        SyncOutcome::Declined => report::print_cancelled(),
    }

    Ok(())
}
