use anyhow::Result;
use clap::Parser;
use bva_download::commands::{self, Output};
use bva_download::environment::BrowserContext;

/// bva-download - Basketball Video Analyzer download helper
///
/// Looks up the latest Basketball Video Analyzer release on GitHub and picks
/// the installer that suits a visitor's operating system and CPU.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   bva-download latest
///   bva-download recommend --user-agent "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"
#[derive(Parser, Debug)]
#[command(author, version = env!("BVA_DOWNLOAD_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Browser user agent used for platform detection (also via BVA_USER_AGENT)
    #[arg(long, env = "BVA_USER_AGENT", value_name = "UA", global = true)]
    pub user_agent: Option<String>,

    /// Browser platform string used for platform detection (also via BVA_PLATFORM)
    #[arg(long, env = "BVA_PLATFORM", value_name = "PLATFORM", global = true)]
    pub platform: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the latest published release
    Latest,

    /// List recent releases
    Releases,

    /// Show the recommended download for the detected platform
    Recommend,

    /// Show the built-in fallback release
    Fallback,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = bva_download::runtime::RealRuntime;
    let output = Output { json: cli.json };

    match cli.command {
        Commands::Latest => commands::latest(runtime, cli.api_url, output).await?,
        Commands::Releases => commands::releases(runtime, cli.api_url, output).await?,
        Commands::Recommend => {
            let ctx = BrowserContext::from_parts(cli.user_agent, cli.platform);
            commands::recommend(runtime, cli.api_url, ctx, output).await?
        }
        Commands::Fallback => commands::fallback(output)?,
    }
    Ok(())
}
