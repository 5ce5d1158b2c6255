use std::path::{Path, PathBuf};

use clap::Parser;
use common::config::{Dispatch, LookupMiss};
use eyre::{Context, ContextCompat, Result};
use tokio::{fs::write, io::AsyncWriteExt};
use tracing::{debug, error};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod render;

use render::Format;

const MODULES: &[&str] = &["common", "vectorization", "threading"];

/// Turns benchmark JSON reports into Highcharts charts
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Benchmark JSON report, `-` for stdin
    input: PathBuf,
    /// YAML config selecting plots and settings
    #[arg(short, long = "config")]
    config_file: Option<PathBuf>,
    /// Write charts here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Highcharts)]
    format: Format,
    /// Only chart benchmarks whose name matches this regex
    #[arg(long)]
    filter: Option<String>,
    /// by-shape or all
    #[arg(long)]
    dispatch: Option<Dispatch>,
    /// skip, zero-mean or error
    #[arg(long)]
    lookup_miss: Option<LookupMiss>,
    #[arg(short, long)]
    log: Vec<String>,
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn log_file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path.file_name().context("Log file has no file name")?;
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("Open log file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();

    let mut env_filter = EnvFilter::new(format!("bench_charts={log_level}"));
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }
    for module in MODULES {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    let (file_layer, _guard) = match &args.log_file {
        Some(path) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(log_file_appender(path)?);
            (
                Some(layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_writer(std::io::stderr)
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(file_layer)
        .init();

    let mut config = render::load_config(args.config_file.as_deref()).await?;
    if let Some(filter) = args.filter {
        config.settings.filter = Some(filter);
    }
    if let Some(dispatch) = args.dispatch {
        config.settings.dispatch = dispatch;
    }
    if let Some(lookup_miss) = args.lookup_miss {
        config.settings.lookup_miss = lookup_miss;
    }
    debug!("Settings: {:?}", config.settings);

    let out = match render::render_report(&args.input, &config, args.format).await {
        Ok(out) => out,
        Err(err) => {
            error!("{err:#?}");
            return Err(err);
        }
    };

    match args.output {
        Some(path) => write(path, out).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
