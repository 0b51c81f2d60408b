use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use biblia_core::model::HighlightColor;
use biblia_etl::{Config, Corpus};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "biblia", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/biblia/biblia.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory holding the corpus files (default: ~/.local/share/biblia/corpus)
    #[arg(long, global = true)]
    corpus_dir: Option<PathBuf>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Create the database and load every bundled corpus that is missing
    ///
    /// Runs the startup sequence: the schema is applied, then each corpus
    /// (bible, apocrypha, quran, hymns, materials) is checked against the
    /// completeness oracle and loaded only if it is not already present.
    /// A missing corpus file is reported and skipped; the other corpora
    /// still load. The chronological reading plan is seeded on first run.
    ///
    /// Safe to run repeatedly.
    Init,
    /// Load one corpus (or all of them), bypassing the completeness check
    /// with --force
    Load {
        /// bible, apocrypha, quran, hymns or materials (default: all)
        corpus: Option<Corpus>,
        /// Reload even if the corpus is already present
        #[arg(long)]
        force: bool,
    },
    /// Show what is cached locally and how complete it is
    Status,
    /// List books, optionally for one collection (ot, nt, apocrypha, torah)
    Books { testament: Option<String> },
    /// Print a chapter
    Read {
        /// Book id or corpus code (e.g. 43 or jo)
        book: String,
        chapter: u32,
        /// Download the chapter if it is not cached
        #[arg(long)]
        fetch: bool,
    },
    /// Search verse text (case-insensitive, at most 100 results)
    Search { query: String },
    /// Print a random verse
    Random,
    /// Download a chapter, or a whole book, from the remote text API
    Fetch {
        /// Book id or corpus code
        book: String,
        /// Only this chapter (default: the whole book)
        chapter: Option<u32>,
    },
    /// Print a surah of the Quran
    Quran { surah: u32 },
    /// Hymnal
    #[command(subcommand)]
    Hymn(HymnCommand),
    /// Study materials and Talmud tractates
    #[command(subcommand)]
    Materials(MaterialsCommand),
    /// Manage bookmarks
    #[command(subcommand)]
    Bookmark(BookmarkCommand),
    /// Manage verse highlights
    #[command(subcommand)]
    Highlight(HighlightCommand),
    /// Reading history
    #[command(subcommand)]
    History(HistoryCommand),
    /// Reading plans
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Reading progress across the canon, or for one book
    Progress { book: Option<String> },
    /// Export or import user data
    #[command(subcommand)]
    Backup(BackupCommand),
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, clap::Subcommand)]
enum HymnCommand {
    /// Print a hymn by number
    Show { number: u32 },
    /// Search titles and lyrics
    Search { query: String },
    /// List hymns, optionally in one category
    List {
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum MaterialsCommand {
    List,
    Search { query: String },
    Show { id: String },
    /// List Talmud tractates
    Tractates,
}

#[derive(Debug, clap::Subcommand)]
enum BookmarkCommand {
    Add {
        book: String,
        chapter: u32,
        verse: u32,
        #[arg(long)]
        note: Option<String>,
    },
    /// Remove every bookmark on a verse
    Remove { book: String, chapter: u32, verse: u32 },
    /// Replace the note of a bookmark
    Note { id: String, note: String },
    List,
}

#[derive(Debug, clap::Subcommand)]
enum HighlightCommand {
    /// Highlight a verse, replacing any existing color
    Set {
        book: String,
        chapter: u32,
        verse: u32,
        /// yellow, green, blue, pink or orange
        color: HighlightColor,
    },
    Remove { book: String, chapter: u32, verse: u32 },
    List,
}

#[derive(Debug, clap::Subcommand)]
enum HistoryCommand {
    Recent {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    Stats,
    Clear,
}

#[derive(Debug, clap::Subcommand)]
enum PlanCommand {
    List,
    Start { plan: u32 },
    /// Show one day of a plan
    Day { plan: u32, day: u32 },
    /// Mark a day completed and advance the plan
    Complete { plan: u32, day: u32 },
    Stats { plan: u32 },
}

#[derive(Debug, clap::Subcommand)]
enum BackupCommand {
    /// Write bookmarks, highlights, history and settings to a JSON file
    Export {
        /// Output file (default: biblia-backup-<date>.json)
        path: Option<PathBuf>,
    },
    /// Restore a backup file
    Import { path: PathBuf },
    /// Count what an export would contain
    Stats,
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Show config file path
    Path,
    /// Show example configuration
    Example,
    /// Initialize config file with defaults
    Init,
    /// Get a config value (or the whole file)
    Get { key: Option<String> },
    /// Set a config value
    Set { key: String, value: String },
}

fn log_level(name: &str) -> twyg::LogLevel {
    match name.to_ascii_lowercase().as_str() {
        "trace" => twyg::LogLevel::Trace,
        "debug" => twyg::LogLevel::Debug,
        "warn" | "warning" => twyg::LogLevel::Warn,
        "error" => twyg::LogLevel::Error,
        _ => twyg::LogLevel::Info,
    }
}

fn setup_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        twyg::LogLevel::Debug
    } else {
        log_level(&config.log_level)
    };
    let opts = twyg::OptsBuilder::new()
        .coloured(config.log_coloured)
        .level(level)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {e:?}"))?;
    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Failed to set up logging: {e:?}"))?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if let Some(corpus_dir) = cli.corpus_dir {
        config.corpus_dir = corpus_dir;
    }
    setup_logging(&config, cli.verbose)?;

    match cli.command {
        Commands::Init => commands::run_init(&config)?,
        Commands::Load { corpus, force } => commands::run_load(&config, corpus, force)?,
        Commands::Status => commands::show_status(&config)?,
        Commands::Books { testament } => commands::read::list_books(&config, testament.as_deref())?,
        Commands::Read {
            book,
            chapter,
            fetch,
        } => commands::read::read_chapter(&config, &book, chapter, fetch).await?,
        Commands::Search { query } => commands::read::search(&config, &query)?,
        Commands::Random => commands::read::random(&config)?,
        Commands::Fetch { book, chapter } => commands::fetch::run_fetch(&config, &book, chapter).await?,
        Commands::Quran { surah } => commands::read::quran(&config, surah)?,
        Commands::Hymn(cmd) => match cmd {
            HymnCommand::Show { number } => commands::read::hymn(&config, number)?,
            HymnCommand::Search { query } => commands::read::hymn_search(&config, &query)?,
            HymnCommand::List { category } => commands::read::hymn_list(&config, category.as_deref())?,
        },
        Commands::Materials(cmd) => match cmd {
            MaterialsCommand::List => commands::read::materials_list(&config)?,
            MaterialsCommand::Search { query } => commands::read::materials_search(&config, &query)?,
            MaterialsCommand::Show { id } => commands::read::material(&config, &id)?,
            MaterialsCommand::Tractates => commands::read::tractates(&config)?,
        },
        Commands::Bookmark(cmd) => match cmd {
            BookmarkCommand::Add {
                book,
                chapter,
                verse,
                note,
            } => commands::annotate::bookmark_add(&config, &book, chapter, verse, note.as_deref())?,
            BookmarkCommand::Remove {
                book,
                chapter,
                verse,
            } => commands::annotate::bookmark_remove(&config, &book, chapter, verse)?,
            BookmarkCommand::Note { id, note } => commands::annotate::bookmark_note(&config, &id, &note)?,
            BookmarkCommand::List => commands::annotate::bookmark_list(&config)?,
        },
        Commands::Highlight(cmd) => match cmd {
            HighlightCommand::Set {
                book,
                chapter,
                verse,
                color,
            } => commands::annotate::highlight_set(&config, &book, chapter, verse, color)?,
            HighlightCommand::Remove {
                book,
                chapter,
                verse,
            } => commands::annotate::highlight_remove(&config, &book, chapter, verse)?,
            HighlightCommand::List => commands::annotate::highlight_list(&config)?,
        },
        Commands::History(cmd) => match cmd {
            HistoryCommand::Recent { limit } => commands::reading::history_recent(&config, limit)?,
            HistoryCommand::Stats => commands::reading::history_stats(&config)?,
            HistoryCommand::Clear => commands::reading::history_clear(&config)?,
        },
        Commands::Plan(cmd) => match cmd {
            PlanCommand::List => commands::reading::plan_list(&config)?,
            PlanCommand::Start { plan } => commands::reading::plan_start(&config, plan)?,
            PlanCommand::Day { plan, day } => commands::reading::plan_day(&config, plan, day)?,
            PlanCommand::Complete { plan, day } => commands::reading::plan_complete(&config, plan, day)?,
            PlanCommand::Stats { plan } => commands::reading::plan_stats(&config, plan)?,
        },
        Commands::Progress { book } => commands::reading::progress(&config, book.as_deref())?,
        Commands::Backup(cmd) => match cmd {
            BackupCommand::Export { path } => commands::backup::export(&config, path)?,
            BackupCommand::Import { path } => commands::backup::import(&config, &path)?,
            BackupCommand::Stats => commands::backup::stats(&config)?,
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommand::Show => commands::config::show_config(&config)?,
            ConfigCommand::Path => commands::config::show_path()?,
            ConfigCommand::Example => commands::config::show_example()?,
            ConfigCommand::Init => commands::config::init_config()?,
            ConfigCommand::Get { key } => commands::config::get_config(&config, key.as_deref())?,
            ConfigCommand::Set { key, value } => commands::config::set_config(&key, &value)?,
        },
    }

    Ok(())
}
