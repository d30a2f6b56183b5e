//! Design KB CLI
//!
//! Read-only inspection of a design document.

use clap::{Parser, Subcommand};

use design_kb::error::Result;
use design_kb::{AppContext, FeatureEntity, Record, Repository, TermEntity, TermQueries};

#[derive(Parser)]
#[command(name = "design-kb")]
#[command(about = "Inspect a design knowledge base document")]
#[command(version)]
struct Cli {
    /// Path of the JSON document
    #[arg(
        long,
        env = "DESIGN_KB_DATA_PATH",
        default_value = "~/.local/share/design-kb/design.json"
    )]
    data_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List feature names and purposes
    Features,
    /// List terms, optionally filtered
    Terms {
        /// Only terms in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only terms in this bounded context
        #[arg(short = 'x', long)]
        context: Option<String>,
        /// Only terms associated with this feature
        #[arg(short, long)]
        function: Option<String>,
    },
    /// Print a feature as JSON
    ShowFeature {
        name: String,
    },
    /// Print a term as JSON
    ShowTerm {
        name: String,
    },
    /// Show statistics
    Stats,
    /// Load every record and report the first corrupt one
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Expand ~ in path
    let data_path = shellexpand::tilde(&cli.data_path).to_string();
    let ctx = AppContext::open(data_path);

    match cli.command {
        Commands::Features => {
            for feature in ctx.catalog.feature_index().await? {
                println!("{} - {}", feature.name, truncate(&feature.purpose, 60));
            }
        }

        Commands::Terms {
            category,
            context,
            function,
        } => {
            let terms = match (category, context, function) {
                (Some(category), _, _) => ctx.terms.find_by_category(&category).await?,
                (None, Some(context), _) => ctx.terms.find_by_bounded_context(&context).await?,
                (None, None, Some(function)) => {
                    ctx.terms.find_by_associated_function(&function).await?
                }
                (None, None, None) => ctx.terms.find_all().await?,
            };

            for term in terms {
                println!(
                    "{} [{} / {}] - {}",
                    term.name(),
                    term.category(),
                    term.bounded_context(),
                    truncate(term.definition(), 60)
                );
            }
        }

        Commands::ShowFeature { name } => {
            let name = FeatureEntity::parse_name(&name)?;
            match ctx.features.find_by_name(&name).await? {
                Some(feature) => println!("{}", serde_json::to_string_pretty(&feature.to_value())?),
                None => println!("Feature '{}' not found", name),
            }
        }

        Commands::ShowTerm { name } => {
            let name = TermEntity::parse_name(&name)?;
            match ctx.terms.find_by_name(&name).await? {
                Some(term) => println!("{}", serde_json::to_string_pretty(&term.to_value())?),
                None => println!("Term '{}' not found", name),
            }
        }

        Commands::Stats => {
            let stats = ctx.catalog.statistics().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }

        Commands::Check => {
            let features = ctx.features.find_all().await?;
            let terms = ctx.terms.find_all().await?;
            println!(
                "OK: {} feature(s) and {} term(s) in {}",
                features.len(),
                terms.len(),
                ctx.data_path()
            );
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    let first_line = s.lines().next().unwrap_or(s);
    if first_line.chars().count() <= max {
        first_line.to_string()
    } else {
        let head: String = first_line.chars().take(max - 3).collect();
        format!("{}...", head)
    }
}
