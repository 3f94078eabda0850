//! vgdss CLI
//!
//! Command-line interface for the decision-support backend:
//! - Check backend status
//! - Browse and export the games dataset
//! - Show analytics, association rules and business guidance
//! - Request success predictions

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::BufReader;

use vgdss::client::{AnalyticsView, ClientError, DssClient, PredictionRequest};
use vgdss::config::{generate_default_config, Config};
use vgdss::display;
use vgdss::explorer::{
    fetch_clamped, ExplorerController, PageInfo, QueryState, SortColumn, SortOrder,
};
use vgdss::guidance::GuidanceSection;
use vgdss::{logging, session};

#[derive(Parser)]
#[command(name = "vgdss")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Video game sales browser and success predictor")]
#[command(long_about = "vgdss talks to the video games decision-support backend.\nBrowse sales data, inspect analytics, and predict how a new title might perform.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and VGDSS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show backend status
    Status,

    /// List platforms, genres, publishers and model facts
    Metadata,

    /// Summary statistics and chart data
    Dashboard,

    /// Show one page of games
    Games {
        /// Search by name
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        publisher: Option<String>,
        /// Earliest release year
        #[arg(long)]
        year_min: Option<i32>,
        /// Latest release year
        #[arg(long)]
        year_max: Option<i32>,
        /// Sort column (e.g. global_sales, year, critic)
        #[arg(long, default_value = "Global_Sales")]
        sort: SortColumn,
        /// Sort direction (asc, desc)
        #[arg(long, default_value = "desc")]
        order: SortOrder,
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Rows per page (default: from config)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Best-selling games
    Top {
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },

    /// Browse the dataset interactively
    Explore,

    /// Predict the sales category of a hypothetical game
    Predict {
        #[arg(long, default_value = "PS4")]
        platform: String,
        #[arg(long, default_value = "Action")]
        genre: String,
        #[arg(long, default_value = "Electronic Arts")]
        publisher: String,
        /// Critic score (0-100)
        #[arg(long, default_value = "75")]
        critic_score: f64,
        /// User score (0-10)
        #[arg(long, default_value = "7.0")]
        user_score: f64,
        /// Release year
        #[arg(long, default_value = "2026")]
        year: i32,
    },

    /// Show an analytics view
    Analytics {
        /// chart-data, summary, genre, platform, yearly, correlation, rules, clusters
        view: AnalyticsView,
    },

    /// Mined association rules
    Rules,

    /// Business guidance for publishers, developers and investors
    Recommendations {
        /// strategic, publisher, developer, investor, rules
        #[arg(default_value = "strategic")]
        section: GuidanceSection,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => {
            let (config, source, errors) = Config::load_default();
            for error in errors {
                eprintln!("Warning: {}", error);
            }
            if let Some(path) = source {
                eprintln!("Using config {}", path.display());
            }
            config
        }
    };

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_games(format: OutputFormat, games: &[vgdss::Game]) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&games)?,
        OutputFormat::Csv => display::write_games_csv(games, std::io::stdout())?,
        OutputFormat::Table => print!("{}", display::render_games_table(games, None)),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let client = DssClient::new(config.api.client_config())?;
    tracing::debug!(base_url = %client.config().base_url, "Client ready");

    match cli.command {
        Commands::Status => match client.health().await {
            Ok(health) => {
                println!("vgdss v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Backend: {}", client.config().base_url);
                println!("Status:  {}", health.status);
                if let Some(message) = health.message {
                    println!("Message: {}", message);
                }
            }
            Err(ClientError::Unavailable(url)) => {
                eprintln!("Cannot connect to the backend at {}", url);
                eprintln!();
                eprintln!("Make sure the API server is running, or pass --api-url.");
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },

        Commands::Metadata => {
            let metadata = client.metadata().await?;
            match cli.format {
                OutputFormat::Table => print!("{}", display::render_metadata(&metadata)),
                _ => print_json(&metadata)?,
            }
        }

        Commands::Dashboard => {
            let (summary, charts) = tokio::join!(
                client.summary(),
                client.analytics(AnalyticsView::ChartData)
            );
            let summary = summary?;
            let charts = charts?;

            match cli.format {
                OutputFormat::Table => {
                    print!("{}", display::render_summary(&summary));
                    println!();
                    print!("{}", display::render_analytics(AnalyticsView::ChartData, &charts));
                }
                _ => print_json(&serde_json::json!({
                    "summary": summary,
                    "chart_data": charts,
                }))?,
            }
        }

        Commands::Games {
            search,
            platform,
            genre,
            publisher,
            year_min,
            year_max,
            sort,
            order,
            page,
            page_size,
        } => {
            let mut state = QueryState {
                search: search.unwrap_or_default(),
                platform: platform.unwrap_or_default(),
                genre: genre.unwrap_or_default(),
                publisher: publisher.unwrap_or_default(),
                year_min,
                year_max,
                sort_column: sort,
                sort_order: order,
                page: page.max(1),
                ..QueryState::with_page_size(page_size.unwrap_or(config.explorer.page_size))
            };

            let result = fetch_clamped(&client, &mut state).await?;
            if cli.format == OutputFormat::Table {
                let info = PageInfo::new(state.page, result.total, state.page_size);
                print!("{}", display::render_explorer(&state, &result.games, &info, false));
            } else {
                print_games(cli.format, &result.games)?;
            }
        }

        Commands::Top { limit } => {
            let games = client.top_games(limit).await?;
            print_games(cli.format, &games)?;
        }

        Commands::Explore => {
            let metadata = match client.metadata().await {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    tracing::warn!(error = %e, "Metadata unavailable");
                    None
                }
            };

            let mut controller =
                ExplorerController::new(Arc::new(client), config.explorer.explorer_config());

            println!("{}", session::HELP);
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            session::run(&mut controller, metadata.as_ref(), stdin, &mut stdout).await?;
        }

        Commands::Predict {
            platform,
            genre,
            publisher,
            critic_score,
            user_score,
            year,
        } => {
            let request = PredictionRequest {
                platform,
                genre,
                publisher,
                critic_score,
                user_score,
                year,
            };

            let result = client.predict(&request).await?;
            match cli.format {
                OutputFormat::Table => print!("{}", display::render_prediction(&result)),
                _ => print_json(&result)?,
            }
        }

        Commands::Analytics { view } => {
            let data = client.analytics(view).await?;
            match cli.format {
                OutputFormat::Table => print!("{}", display::render_analytics(view, &data)),
                _ => print_json(&data)?,
            }
        }

        Commands::Rules => {
            let rules = client.rules().await?;
            match cli.format {
                OutputFormat::Table => print!("{}", display::render_rules(&rules)),
                _ => print_json(&rules)?,
            }
        }

        Commands::Recommendations { section } => {
            let (metadata, rules) = match section {
                GuidanceSection::Investor => (Some(client.metadata().await?), Vec::new()),
                GuidanceSection::Rules => (None, client.rules().await?),
                _ => (None, Vec::new()),
            };
            print!(
                "{}",
                display::render_guidance(section, metadata.as_ref(), &rules)
            );
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}
