use bl_core::{ArticleStore, Error, Result};
use bl_registry::StaticRegistry;
use bl_web::{AppState, CorsOrigins, ServerConfig};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bias Lab article registry", long_about = None)]
pub struct Cli {
    #[arg(long, env = "API_HOST", default_value = bl_web::config::DEFAULT_HOST, global = true)]
    host: String,
    #[arg(long, env = "API_PORT", default_value_t = bl_web::config::DEFAULT_PORT, global = true)]
    port: u16,
    /// Comma-separated list of origins allowed by CORS. Any origin when unset.
    #[arg(long, env = "FRONTEND_ORIGINS", global = true)]
    frontend_origins: Option<String>,
    /// Directory mounted at /static
    #[arg(long, env = "STATIC_DIR", default_value = bl_web::config::DEFAULT_STATIC_DIR, global = true)]
    static_dir: PathBuf,
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve,
    /// Print article summaries, most recent first
    Articles,
    /// Print one article in full
    Article {
        id: String,
    },
    /// Print narrative clusters
    Narratives,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            frontend_origins: CorsOrigins::parse(self.frontend_origins.as_deref()),
            static_dir: self.static_dir.clone(),
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("invalid log filter {:?}: {}", level, e)))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let registry = StaticRegistry::reference()?;
    info!(
        "📚 Loaded {} articles and {} narratives",
        registry.article_count(),
        registry.narrative_count()
    );

    match &cli.command {
        Commands::Serve => {
            let state = AppState::new(Arc::new(registry))?;
            bl_web::serve(state, &cli.server_config()).await?;
        }
        Commands::Articles => print_json(&registry.list_articles().await?)?,
        Commands::Article { id } => print_json(&registry.get_article(id).await?)?,
        Commands::Narratives => print_json(&registry.list_narratives().await?)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["biaslab", "serve", "--static-dir", "assets"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve));
        assert_eq!(cli.server_config().static_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_origins_flag_builds_allow_list() {
        let cli = Cli::try_parse_from([
            "biaslab",
            "serve",
            "--port",
            "9001",
            "--frontend-origins",
            "https://biaslab.app,http://localhost:5173",
        ])
        .unwrap();
        let config = cli.server_config();
        assert_eq!(config.bind_address(), format!("{}:9001", config.host));
        assert_eq!(
            config.frontend_origins,
            CorsOrigins::List(vec![
                "https://biaslab.app".to_string(),
                "http://localhost:5173".to_string(),
            ])
        );
    }

    #[test]
    fn test_article_requires_id() {
        assert!(Cli::try_parse_from(["biaslab", "article"]).is_err());
        let cli = Cli::try_parse_from(["biaslab", "article", "a1"]).unwrap();
        assert!(matches!(cli.command, Commands::Article { ref id } if id == "a1"));
    }

    #[test]
    fn test_bad_log_filter_is_config_error() {
        assert!(matches!(init_logging("biaslab=loud"), Err(Error::Config(_))));
    }
}
