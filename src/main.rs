use arxiv_search::commands::{init_config, run_search, show_config};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arxiv-search")]
#[command(about = "Semantic search over arXiv papers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for papers similar to a free-text query or an arXiv URL
    Search {
        /// Free text (up to 200 characters) or an arXiv abstract-page URL
        query: String,
        /// Pretty-print the JSON response
        #[arg(long)]
        pretty: bool,
    },
    /// Show or initialize the configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search { query, pretty } => run_search(&query, pretty)?,
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                init_config()?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn search_command_with_query() {
        let cli = Cli::try_parse_from(["arxiv-search", "search", "transformer models"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Search { query, pretty } = parsed.command {
                assert_eq!(query, "transformer models");
                assert!(!pretty);
            }
        }
    }

    #[test]
    fn search_command_pretty_flag() {
        let cli = Cli::try_parse_from(["arxiv-search", "search", "--pretty", "lattice QCD"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Search { pretty, .. } = parsed.command {
                assert!(pretty);
            }
        }
    }

    #[test]
    fn config_show_flag() {
        let cli = Cli::try_parse_from(["arxiv-search", "config", "--show"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Config { show } = parsed.command {
                assert!(show);
            }
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["arxiv-search", "invalid"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn search_requires_a_query() {
        let cli = Cli::try_parse_from(["arxiv-search", "search"]);
        assert!(cli.is_err());
    }
}
