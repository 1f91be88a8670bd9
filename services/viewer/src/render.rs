//! Plain-text rendering of the catalog and the selected problem

use std::fmt::Write;
use std::time::Instant;

use catalog::{category_name, difficulty_label, FileSection, ProblemRecord};
use kvstore::Storage;
use session::Session;

const PREVIEW_LINES: usize = 12;

pub fn catalog<S: Storage>(session: &Session<S>, out: &mut String) -> std::fmt::Result {
    let store = session.store();
    match store.file_name() {
        Some(name) => writeln!(out, "CVDP dataset: {name}")?,
        None if store.records().is_empty() => {
            writeln!(out, "No dataset loaded. Set CVDP_UPLOAD to a .jsonl file.")?;
            return Ok(());
        }
        None => writeln!(out, "CVDP dataset")?,
    }
    if let Some(fp) = store.fingerprint() {
        let short: String = fp.chars().take(16).collect();
        writeln!(out, "fingerprint: {short}")?;
    }

    let counts = session.counts();
    writeln!(out, "Showing {} of {} problems", counts.shown, counts.total)?;
    writeln!(out)?;

    for p in session.visible() {
        let marks = format!(
            "{}{}",
            if store.is_favorite(&p.id) { '*' } else { ' ' },
            if store.is_solved(&p.id) { '+' } else { ' ' },
        );
        writeln!(
            out,
            "{marks} {:<40} {:<30} {:<7} {}",
            p.title,
            category_name(&p.category),
            difficulty_label(&p.difficulty),
            p.shape.label(),
        )?;
    }
    Ok(())
}

pub fn problem<S: Storage>(session: &Session<S>, record: &ProblemRecord, out: &mut String) -> std::fmt::Result {
    let view = session.view();
    let now = Instant::now();

    writeln!(out)?;
    writeln!(out, "== {} ({})", record.title, record.id)?;
    writeln!(
        out,
        "{} | {} | {}",
        category_name(&record.category),
        difficulty_label(&record.difficulty),
        record.shape.label()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", record.display_description())?;

    if let Some(system) = &record.system_message {
        writeln!(out)?;
        writeln!(out, "System message:")?;
        writeln!(out, "{system}")?;
    }

    for section in FileSection::ALL {
        let files = record.files(section);
        if files.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{} files ({}):", section_title(section), files.len())?;

        for (key, shipped) in files {
            let expanded = view.expansion.is_expanded(section, key);
            let copied = if view.is_copied(section, key, now) { " (copied)" } else { "" };
            writeln!(out, "  {} {key}{copied}", if expanded { 'v' } else { '>' })?;
            if !expanded {
                continue;
            }

            let text = match section {
                FileSection::Patch => session.patch_text(key).unwrap_or_else(|| shipped.clone()),
                _ => shipped.clone(),
            };
            for line in text.lines().take(PREVIEW_LINES) {
                writeln!(out, "      {line}")?;
            }
            let total = text.lines().count();
            if total > PREVIEW_LINES {
                writeln!(out, "      ... ({} more lines)", total - PREVIEW_LINES)?;
            }
        }
    }

    if let Some(solution) = session.store().load_solution(&record.id) {
        writeln!(out)?;
        writeln!(out, "Saved solution ({} characters)", solution.chars().count())?;
    }
    Ok(())
}

fn section_title(section: FileSection) -> &'static str {
    match section {
        FileSection::Context => "Context",
        FileSection::Harness => "Harness",
        FileSection::Patch => "Solution",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{load_text, DatasetStore};
    use kvstore::InMemoryStorage;

    #[test]
    fn test_render_catalog_and_problem() {
        let mut store = DatasetStore::open(InMemoryStorage::new());
        let records = load_text(
            r#"{"id":"cvdp_agentic_fifo_0001","categories":["cid016","hard"],"prompt":"Fix it","patch":{"rtl/fifo.sv":""}}"#,
        )
        .records;
        store.persist_dataset(&records, "one.jsonl", None);
        let mut session = Session::new(DatasetStore::open(store.storage().clone()));
        session.select("cvdp_agentic_fifo_0001");
        session.edit_draft("rtl/fifo.sv", "module fifo;");

        let mut out = String::new();
        catalog(&session, &mut out).unwrap();
        assert!(out.contains("CVDP dataset: one.jsonl"));
        assert!(out.contains("Showing 1 of 1 problems"));
        assert!(out.contains("Debugging"));
        assert!(out.contains("HARD"));

        let record = session.selected().unwrap().clone();
        problem(&session, &record, &mut out).unwrap();
        assert!(out.contains("Solution files (1):"));
        assert!(out.contains("      module fifo;"));
    }

    #[test]
    fn test_render_non_ascii_fingerprint() {
        let storage = InMemoryStorage::new();
        let mut store = DatasetStore::open(storage.clone());
        let records = load_text(r#"{"id":"a","prompt":"p"}"#).records;
        store.persist_dataset(&records, "a.jsonl", Some("aéééééééééééééééé"));

        let session = Session::new(DatasetStore::open(storage));
        let mut out = String::new();
        catalog(&session, &mut out).unwrap();
        assert!(out.contains("fingerprint: aééééééééééééééé\n"));
    }

    #[test]
    fn test_render_empty_store() {
        let session = Session::new(DatasetStore::open(InMemoryStorage::new()));
        let mut out = String::new();
        catalog(&session, &mut out).unwrap();
        assert!(out.starts_with("No dataset loaded"));
    }
}
