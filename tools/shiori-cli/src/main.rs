//! Shiori command-line front end
//!
//! Loads a book catalog from CSV, builds the recommender once, and answers
//! queries from the command line or, one per line, from stdin.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use shiori_core::{
    CatalogStats, IdfMode, Outcome, Recommender, RecommenderConfig, SearchBy, ShioriError,
};
use tracing::{Level, info};

/// Default catalog location
fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shiori")
        .join("books.csv")
}

/// CLI arguments
#[derive(Parser)]
#[command(name = "shiori")]
#[command(about = "Recommend books similar to a title, author, or publisher")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog CSV file
    #[arg(short, long, env = "SHIORI_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Number of recommendations per query
    #[arg(short = 'k', long, env = "SHIORI_TOP_K", default_value_t = 10, global = true)]
    top_k: usize,

    /// Use unsmoothed ln(N/df) term weighting
    #[arg(long, global = true)]
    raw_idf: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend books for a single query
    Recommend {
        /// Title, author, or publisher to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// What the query names (advisory; all fields are always searched)
        #[arg(short, long, value_enum, default_value_t = Category::Title)]
        by: Category,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read one query per line from stdin and print JSON lines
    Interactive {
        /// What the queries name (advisory)
        #[arg(short, long, value_enum, default_value_t = Category::Title)]
        by: Category,
    },
    /// Show catalog and index statistics
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Search category as offered on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Category {
    Title,
    Author,
    Publisher,
}

impl From<Category> for SearchBy {
    fn from(category: Category) -> Self {
        match category {
            Category::Title => SearchBy::Title,
            Category::Author => SearchBy::Author,
            Category::Publisher => SearchBy::Publisher,
        }
    }
}

/// One line of interactive output.
#[derive(Debug, Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    #[serde(flatten)]
    outcome: &'a Outcome,
}

#[derive(Debug, Serialize)]
struct StatsOutput {
    records: usize,
    vocabulary: usize,
    #[serde(flatten)]
    catalog: CatalogStats,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::WARN
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Formats an outcome for terminal display.
fn render_outcome(outcome: &Outcome) -> String {
    let mut out = String::new();
    match outcome {
        Outcome::NotFound { message } => {
            let _ = writeln!(out, "{message}");
        }
        Outcome::Found {
            recommendations, ..
        } if recommendations.is_empty() => {
            let _ = writeln!(out, "No similar books in the catalog.");
        }
        Outcome::Found {
            recommendations, ..
        } => {
            let _ = writeln!(out, "Recommended Books:");
            for rec in recommendations {
                let _ = writeln!(out, "Title: {}", rec.book.title());
                let _ = writeln!(out, "Author: {}", rec.book.authors());
                let _ = writeln!(out, "Publisher: {}", rec.book.publisher());
                let _ = writeln!(out, "---");
            }
        }
    }
    out
}

fn render_stats(stats: &StatsOutput) -> String {
    format!(
        "records: {}\nrows read: {}\nrows skipped: {}\nduplicates removed: {}\nvocabulary: {}\n",
        stats.records,
        stats.catalog.rows_read,
        stats.catalog.rows_skipped,
        stats.catalog.duplicates_removed,
        stats.vocabulary,
    )
}

/// Answers one query per input line, writing one JSON object per line.
///
/// Blank lines are skipped. Other lines go to the resolver untrimmed.
fn run_interactive<R: BufRead, W: Write>(
    recommender: &Recommender,
    by: SearchBy,
    input: R,
    mut output: W,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read query from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = recommender.recommend_by(&line, by)?;
        let record = QueryOutput {
            query: &line,
            outcome: &outcome,
        };
        writeln!(output, "{}", serde_json::to_string(&record)?)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let catalog_path = cli.catalog.unwrap_or_else(default_catalog_path);
    let idf_mode = if cli.raw_idf {
        IdfMode::Raw
    } else {
        IdfMode::Smooth
    };
    let config = RecommenderConfig::new()
        .with_top_k(cli.top_k)
        .with_idf_mode(idf_mode);
    config.validate()?;

    let recommender = Recommender::from_path(&catalog_path, config).with_context(|| {
        format!("Failed to load catalog from {}", catalog_path.display())
    })?;

    match cli.command {
        Commands::Recommend { query, by, json } => {
            let query = query.join(" ");
            let outcome = match recommender.recommend_by(&query, by.into()) {
                Ok(outcome) => outcome,
                Err(ShioriError::EmptyQuery) => {
                    info!("No query submitted");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render_outcome(&outcome));
            }
        }
        Commands::Interactive { by } => {
            info!(catalog = %catalog_path.display(), "Reading queries from stdin");
            run_interactive(
                &recommender,
                by.into(),
                io::stdin().lock(),
                io::stdout().lock(),
            )?;
        }
        Commands::Stats { json } => {
            let stats = StatsOutput {
                records: recommender.catalog().len(),
                vocabulary: recommender.index().vocabulary_size(),
                catalog: recommender.catalog().stats(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", render_stats(&stats));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shiori_core::{Catalog, NOT_FOUND_MESSAGE, Recommendation, Record, SearchPhase};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_catalog_path() {
        let path = default_catalog_path();
        assert!(path.to_string_lossy().contains("shiori"));
        assert!(path.ends_with("books.csv"));
    }

    #[test]
    fn test_parse_recommend_args() {
        let cli = Cli::parse_from([
            "shiori", "recommend", "--by", "author", "-k", "5", "frank", "herbert",
        ]);
        assert_eq!(cli.top_k, 5);
        match cli.command {
            Commands::Recommend { query, by, json } => {
                assert_eq!(query.join(" "), "frank herbert");
                assert_eq!(by, Category::Author);
                assert!(!json);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_category_conversion() {
        assert_eq!(SearchBy::from(Category::Title), SearchBy::Title);
        assert_eq!(SearchBy::from(Category::Author), SearchBy::Author);
        assert_eq!(SearchBy::from(Category::Publisher), SearchBy::Publisher);
    }

    #[test]
    fn test_render_not_found() {
        let out = render_outcome(&Outcome::not_found());
        assert_eq!(out.trim(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_render_recommendations() {
        let outcome = Outcome::Found {
            matched: 0,
            phase: SearchPhase::Title,
            recommendations: vec![Recommendation {
                rank: 1,
                index: 1,
                score: 0.8,
                book: Record::new("dune messiah", "frank herbert", "ace books", "en"),
            }],
        };
        let out = render_outcome(&outcome);
        assert!(out.starts_with("Recommended Books:"));
        assert!(out.contains("Title: dune messiah"));
        assert!(out.contains("Author: frank herbert"));
        assert!(out.contains("Publisher: ace books"));
        assert!(out.trim_end().ends_with("---"));
    }

    #[test]
    fn test_render_empty_neighbors() {
        let outcome = Outcome::Found {
            matched: 0,
            phase: SearchPhase::Title,
            recommendations: Vec::new(),
        };
        assert!(render_outcome(&outcome).contains("No similar books"));
    }

    #[test]
    fn test_query_output_json() {
        let outcome = Outcome::not_found();
        let output = QueryOutput {
            query: "neuromancer",
            outcome: &outcome,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["query"], "neuromancer");
        assert_eq!(json["status"], "not_found");
    }

    #[test]
    fn test_render_stats() {
        let stats = StatsOutput {
            records: 2,
            vocabulary: 9,
            catalog: CatalogStats {
                rows_read: 3,
                rows_skipped: 1,
                duplicates_removed: 1,
            },
        };
        let out = render_stats(&stats);
        assert!(out.contains("records: 2"));
        assert!(out.contains("rows skipped: 1"));
        assert!(out.contains("vocabulary: 9"));
    }

    fn dune_shelf() -> Recommender {
        let catalog = Catalog::from_records(vec![
            Record::new("dunes", "frank herbert", "ace books", "en"),
            Record::new("big dune", "frank herbert", "ace books", "en"),
        ]);
        Recommender::build(catalog, RecommenderConfig::default()).unwrap()
    }

    fn interactive_lines(input: &str) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        run_interactive(&dune_shelf(), SearchBy::Title, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_interactive_one_object_per_query() {
        let lines = interactive_lines("dune\nneuromancer\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["query"], "dune");
        assert_eq!(lines[0]["status"], "found");
        assert_eq!(lines[1]["status"], "not_found");
    }

    #[test]
    fn test_interactive_skips_blank_lines() {
        let lines = interactive_lines("\n   \n\t\ndune\n\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["query"], "dune");
    }

    #[test]
    fn test_interactive_keeps_surrounding_whitespace() {
        // " dune" only occurs inside "big dune"
        let lines = interactive_lines("dune\n dune\n");
        assert_eq!(lines[0]["matched"], 0);
        assert_eq!(lines[1]["query"], " dune");
        assert_eq!(lines[1]["matched"], 1);

        let direct = dune_shelf().recommend(" dune").unwrap();
        assert!(matches!(direct, Outcome::Found { matched: 1, .. }));
    }

    #[test]
    fn test_zero_top_k_is_a_config_error() {
        let config = RecommenderConfig::new().with_top_k(0);
        assert!(matches!(config.validate(), Err(ShioriError::InvalidConfig(_))));
    }
}
