mod app;
mod config;
mod error;
mod headless;
mod upload;
mod utils;

use anyhow::Context;
use app::ExcelJoiner;
use clap::Parser;
use config::{ConfigFile, Settings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use upload::{DirectorySink, HttpJoinService};

#[derive(Parser, Debug)]
#[command(name = "excel-joiner", version, about = "Join two Excel workbooks through the joiner service")]
struct Args {
    /// Join endpoint to POST the workbooks to.
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory `joined_output.xlsx` is written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Config file to read instead of ./excel-joiner.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// First workbook. Supplying either file runs without a window.
    #[arg(long)]
    file1: Option<PathBuf>,

    /// Second workbook.
    #[arg(long)]
    file2: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            endpoint: self.endpoint.clone(),
            output_dir: self.output_dir.clone(),
            request_timeout_secs: None,
        }
    }

    fn is_headless(&self) -> bool {
        self.file1.is_some() || self.file2.is_some()
    }
}

fn run_headless(args: Args, settings: Settings) -> anyhow::Result<()> {
    let service = HttpJoinService::new(settings.endpoint.clone(), settings.request_timeout)?;
    let sink = DirectorySink::new(settings.output_dir.clone());
    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    rt.block_on(headless::join_once(&service, &sink, args.file1, args.file2))?;
    Ok(())
}

fn run_gui(settings: Settings) -> anyhow::Result<()> {
    let service = HttpJoinService::new(settings.endpoint.clone(), settings.request_timeout)
        .context("failed to initialize the join client")?;
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Excel Joiner Pro")
            .with_inner_size([560.0, 520.0])
            .with_min_inner_size([420.0, 460.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Excel Joiner Pro",
        options,
        Box::new(move |cc| Box::new(ExcelJoiner::new(cc, service, settings))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let file = config::load_config(args.config.as_deref()).merge(args.overrides());
    let settings = Settings::from_file(file);
    tracing::debug!(?settings, "resolved settings");

    if args.is_headless() {
        run_headless(args, settings)
    } else {
        run_gui(settings)
    }
}
