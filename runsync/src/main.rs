use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

use runsync_core::config;
use runsync_core::tracing_ext::init_tracing;

mod serve;

#[derive(Parser)]
#[command(author, version, about)]
struct CommandLine {
    /// Path to a configuration file in a YAML format.
    ///
    /// The RUNSYNC_CONFIG environment variable is used if this option is not
    /// specified.
    #[arg(short, long, env = "RUNSYNC_CONFIG")]
    config: PathBuf,

    /// Logging format.
    #[arg(long, value_enum, env = "RUNSYNC_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

#[tokio::main]
async fn main() {
    let cl = CommandLine::parse();

    init_tracing(cl.log_format.as_str());

    let config = config::load(&cl.config);
    tracing::info!(config.path = %cl.config.display(), "Loaded");

    serve::main(config).await;
}

// </coverage:exclude>
