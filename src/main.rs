use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cp_stats::{server, summary, FailurePolicy, StatsClient, StatsConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "cp-stats")]
#[command(about = "Competitive programming stats from LeetCode, CodeChef and Codeforces")]
struct Cli {
    #[command(flatten)]
    upstream: UpstreamArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Look up one user and print the combined stats as JSON.
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
struct UpstreamArgs {
    #[arg(long, env = "LEETCODE_GRAPHQL_URL", default_value = "https://leetcode.com/graphql")]
    leetcode_graphql_url: String,

    #[arg(long, env = "CODECHEF_BASE_URL", default_value = "https://www.codechef.com")]
    codechef_base_url: String,

    #[arg(long, env = "CODEFORCES_BASE_URL", default_value = "https://codeforces.com")]
    codeforces_base_url: String,

    /// Browser sessions kept alive between lookups; 0 launches one per lookup.
    #[arg(long, env = "BROWSER_POOL_SIZE", default_value_t = 2)]
    browser_pool_size: usize,

    #[arg(long, env = "CHROME_EXECUTABLE")]
    chrome_executable: Option<PathBuf>,

    #[arg(long, env = "FAILURE_POLICY", default_value_t = FailurePolicy::Isolated)]
    failure_policy: FailurePolicy,
}

impl From<UpstreamArgs> for StatsConfig {
    fn from(args: UpstreamArgs) -> Self {
        StatsConfig {
            leetcode_graphql_url: args.leetcode_graphql_url,
            codechef_base_url: args.codechef_base_url,
            codeforces_base_url: args.codeforces_base_url,
            browser_pool_size: args.browser_pool_size,
            chrome_executable: args.chrome_executable,
            failure_policy: args.failure_policy,
        }
    }
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
}

#[derive(Debug, Args)]
struct LookupArgs {
    username: String,

    /// Print chart data and dashboard cards instead of the raw stats.
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cp_stats=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = Arc::new(StatsClient::with_config(cli.upstream.into()));

    match cli.command {
        Commands::Serve(args) => serve(args, client).await,
        Commands::Lookup(args) => lookup(args, client).await,
    }
}

async fn serve(args: ServeArgs, client: Arc<StatsClient>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", args.host, args.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("couldn't bind {addr}"))?;

    server::serve(listener, client).await?;
    Ok(())
}

async fn lookup(args: LookupArgs, client: Arc<StatsClient>) -> Result<()> {
    let result = client.get_user_stats(&args.username).await;
    client.shutdown().await;
    let stats = result.with_context(|| format!("lookup for {} failed", args.username))?;

    let output = if args.summary {
        serde_json::json!({
            "platforms": summary::platform_summaries(&stats),
            "cards": summary::stat_cards(&stats),
        })
    } else {
        serde_json::to_value(&stats)?
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
