use clap::{Parser, Subcommand};
use dns_pin_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "dns-pin")]
#[command(version)]
#[command(about = "Resolve, check and fetch URLs with DNS pinning against local-address access")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Upstream DNS servers (comma separated, port defaults to 53)
    #[arg(short = 'u', long, value_delimiter = ',', global = true)]
    upstream: Option<Vec<String>>,

    /// Per-server DNS query timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every address a hostname resolves to, following CNAMEs
    Resolve {
        host: String,
    },

    /// Run the pinning policy for a URL and print the resolve overrides
    Check {
        url: String,

        /// Skip resolution and local-address checks
        #[arg(long)]
        allow_local_address: bool,
    },

    /// GET a URL through the pinning pipeline and print status and body
    Fetch {
        url: String,

        /// Skip resolution and local-address checks
        #[arg(long)]
        allow_local_address: bool,

        /// Print response headers
        #[arg(short = 'i', long)]
        include_headers: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        upstream_servers: cli.upstream.clone(),
        query_timeout_ms: cli.timeout_ms,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = cli.config.as_deref().unwrap_or("default"),
        upstreams = ?config.dns.upstream_servers,
        "Starting dns-pin"
    );

    let dns = di::DnsServices::new(&config)?;

    match cli.command {
        Command::Resolve { host } => commands::resolve(&dns, &host).await,
        Command::Check {
            url,
            allow_local_address,
        } => commands::check(&dns, &url, allow_local_address).await,
        Command::Fetch {
            url,
            allow_local_address,
            include_headers,
        } => {
            let pipeline = di::HttpPipeline::new(&config, &dns)?;
            commands::fetch(&pipeline, &url, allow_local_address, include_headers).await
        }
    }
}
