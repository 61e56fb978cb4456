use super::{open_repository, read_text};
use crate::config::AppConfig;
use crate::db::CollectionSummary;
use crate::CollectionsAction;
use anyhow::Result;
use cloze_core::{parser, Collection, CollectionStore, QuizSession};

pub fn execute(config: &AppConfig, action: CollectionsAction) -> Result<()> {
    let mut repo = open_repository(config)?;
    let session = QuizSession::new();

    match action {
        CollectionsAction::List { json } => {
            let summaries = repo.summaries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
                return Ok(());
            }
            if summaries.is_empty() {
                println!("No collections stored.");
            }
            for summary in &summaries {
                println!("{}", render_summary(summary));
            }
        }
        CollectionsAction::Show { id } => {
            let collection = repo.require(id)?;
            println!("{}", collection.title.as_deref().unwrap_or("(untitled)"));
            for line in &collection.raw_problems {
                println!("  {line}");
            }
            let problems: usize = parser::parse_collection(&collection)
                .iter()
                .map(|s| s.problems.len())
                .sum();
            println!("{} lines, {} problems", collection.raw_problems.len(), problems);
        }
        CollectionsAction::Add { file, title, id } => {
            let text = read_text(&file)?;
            let collection = Collection {
                id,
                title,
                raw_problems: parser::parse_raw_lines(&text),
            };
            let id = session.save_collection(&mut repo, &collection)?;
            println!(
                "Saved collection {id} ({} lines)",
                collection.raw_problems.len()
            );
        }
        CollectionsAction::Delete { id } => {
            repo.require(id)?;
            session.delete_collection(&mut repo, id)?;
            println!("Deleted collection {id}");
        }
        CollectionsAction::Clear => {
            repo.clear()?;
            println!("Deleted all collections");
        }
    }
    Ok(())
}

fn render_summary(summary: &CollectionSummary) -> String {
    format!(
        "{:>4}  {:<30}  {:>3} lines  {}",
        summary.id,
        summary.title.as_deref().unwrap_or("(untitled)"),
        summary.line_count,
        summary.updated_at
    )
}
