use anyhow::Result;

use biblia_core::schema::Store;
use biblia_etl::bootstrap::{self, BootstrapReport};
use biblia_etl::loader::{load_corpus, LoadOptions, LoadStatus};
use biblia_etl::{Config, Corpus};

use super::open_store;

fn print_progress(corpus: Corpus, done: usize, total: usize, name: &str) {
    println!("  ⏳ [{corpus}] {done}/{total} {name}");
}

fn print_status(corpus: Corpus, status: &LoadStatus) {
    match status {
        LoadStatus::Loaded(report) => {
            println!("  ✓ [{corpus}] {} units, {} rows", report.units, report.rows);
            if !report.skipped.is_empty() {
                println!("    skipped unknown codes: {}", report.skipped.join(", "));
            }
        }
        LoadStatus::AlreadyLoaded => println!("  ✓ [{corpus}] already loaded"),
        LoadStatus::Failed { reason } => eprintln!("  ✗ [{corpus}] {reason}"),
    }
}

fn print_report(report: &BootstrapReport) {
    for outcome in &report.corpora {
        print_status(outcome.corpus, &outcome.status);
    }
    if report.plan_seeded {
        println!("  ✓ Chronological reading plan created");
    }
}

/// Run the startup sequence.
pub fn run_init(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    println!("\nInitializing {}\n", config.database_path.display());

    let mut progress = print_progress;
    let report = bootstrap::run(&db, config, Some(&mut progress));
    print_report(&report);

    let failed = report.failures().count();
    if failed > 0 {
        println!("\n{failed} corpora unavailable in {}", config.corpus_dir.display());
    } else {
        println!("\n✓ Ready for offline use");
    }
    db.close()?;
    Ok(())
}

/// Load one corpus or all of them. Without `force`, this is the startup
/// sequence restricted to the chosen corpora.
pub fn run_load(config: &Config, corpus: Option<Corpus>, force: bool) -> Result<()> {
    let mut db = open_store(config)?;
    let options = LoadOptions::from(config);
    let selected: Vec<Corpus> = corpus.map_or_else(|| Corpus::ALL.to_vec(), |c| vec![c]);

    for corpus in selected {
        let already = !force && bootstrap::is_loaded(&db, corpus, &options.version)?;
        let status = if already {
            LoadStatus::AlreadyLoaded
        } else {
            let mut progress = |done: usize, total: usize, name: &str| print_progress(corpus, done, total, name);
            load_corpus(&db, corpus, &config.corpus_path(corpus), &options, Some(&mut progress))
        };
        print_status(corpus, &status);
    }
    db.close()?;
    Ok(())
}
