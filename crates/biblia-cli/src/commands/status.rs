use anyhow::Result;

use biblia_core::completeness::{self, OfflineReadiness};
use biblia_core::schema::Store;
use biblia_etl::Config;

use super::open_store;

pub fn show_status(config: &Config) -> Result<()> {
    let mut db = open_store(config)?;
    let bible = completeness::bible_stats(&db, &config.version)?;

    println!("\n📊 Biblia Status\n");
    println!("  Database: {}", config.database_path.display());
    println!("  Version: {}", config.version);
    println!(
        "  Bible: {} books, {} chapters, {} verses ({:.1}%)",
        bible.books_loaded,
        bible.chapters_loaded,
        bible.total_verses,
        bible.percentage()
    );
    match bible.readiness() {
        OfflineReadiness::Complete => println!("  ✓ Complete Bible available offline"),
        OfflineReadiness::Partial { missing } => println!("  ⚠ Partial Bible, about {missing} verses missing"),
        OfflineReadiness::Empty => println!("  ✗ No Bible text cached"),
    }

    let mark = |loaded: bool| if loaded { "✓" } else { "✗" };
    println!(
        "\n  {} Apocrypha: {} verses",
        mark(completeness::is_apocrypha_loaded(&db)?),
        completeness::apocrypha_stats(&db)?
    );
    println!(
        "  {} Quran: {} verses",
        mark(completeness::is_quran_loaded(&db)?),
        completeness::quran_stats(&db)?
    );
    println!(
        "  {} Hymns: {}",
        mark(completeness::are_hymns_loaded(&db)?),
        completeness::hymn_stats(&db)?
    );
    println!(
        "  {} Study materials: {}",
        mark(completeness::are_materials_loaded(&db)?),
        completeness::material_stats(&db)?
    );

    if !bible.is_loaded() {
        println!("\n  Run `biblia init` to load the bundled corpora");
    }
    db.close()?;
    Ok(())
}
