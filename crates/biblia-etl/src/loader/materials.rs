//! Study material loader. Materials come pre-processed from an external
//! PDF import step and are keyed on their opaque id.

use chrono::{SecondsFormat, Utc};
use std::path::Path;

use biblia_core::args;
use biblia_core::schema::Store;

use crate::batch::{BatchWriter, STUDY_MATERIALS};
use crate::corpus::{read_corpus, Corpus, MaterialEntry};
use crate::error::LoadResult;

use super::{finish, report_progress, LoadOptions, LoadReport, LoadStatus, ProgressFn};

pub fn load_materials(
    store: &dyn Store,
    path: &Path,
    options: &LoadOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> LoadStatus {
    log::info!("Loading study materials from {}", path.display());
    let result = read_corpus::<MaterialEntry>(path)
        .and_then(|materials| try_load_materials(store, &materials, options, progress));
    finish(Corpus::Materials, path, result)
}

pub fn try_load_materials(
    store: &dyn Store,
    materials: &[MaterialEntry],
    options: &LoadOptions,
    mut progress: Option<&mut ProgressFn<'_>>,
) -> LoadResult<LoadReport> {
    let mut report = LoadReport::new(Corpus::Materials);
    let total = materials.len();
    let loaded_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    for chunk in materials.chunks(options.batch_size.max(1)) {
        let mut written = 0;
        store.transaction(&mut |tx| {
            let mut writer = BatchWriter::new(tx, &STUDY_MATERIALS, options.batch_size);
            for material in chunk {
                let info = match &material.info {
                    Some(info) => serde_json::to_string(info)?,
                    None => "{}".to_string(),
                };
                writer.push(args![
                    &material.id,
                    &material.title,
                    &material.content,
                    material.page_count,
                    info,
                    material.added_at.as_deref().unwrap_or(&loaded_at),
                ])?;
            }
            written = writer.finish()?;
            Ok(())
        })?;

        report.units += chunk.len();
        report.rows += written;
        if let Some(last) = chunk.last() {
            log::debug!("Loaded material {} ({} pages)", last.title, last.page_count);
            report_progress(&mut progress, report.units, total, &last.title);
        }
    }
    Ok(report)
}
