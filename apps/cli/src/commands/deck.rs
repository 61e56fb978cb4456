use super::{open_repository, read_text};
use crate::config::AppConfig;
use crate::remote::DeckClient;
use crate::DeckAction;
use anyhow::{Context, Result};
use cloze_core::{deck, DeckDocument, QuizSession};

pub async fn execute(config: &AppConfig, action: DeckAction) -> Result<()> {
    match action {
        DeckAction::Fetch { id, save, title } => {
            let client = DeckClient::new(&config.deck_api_url);
            let document = client.fetch_deck(id).await?;

            if save {
                let title = title.or_else(|| Some(format!("Deck {id}")));
                let collection = deck::deck_to_collection(title, &document);
                let mut repo = open_repository(config)?;
                let stored = QuizSession::new().save_collection(&mut repo, &collection)?;
                println!(
                    "Saved deck {id} as collection {stored} ({} lines)",
                    collection.raw_problems.len()
                );
            } else {
                print_structured(&document)?;
            }
        }
        DeckAction::Convert { file } => {
            let text = read_text(&file)?;
            let document: DeckDocument = serde_json::from_str(&text)
                .with_context(|| format!("Invalid deck JSON in {}", file.display()))?;
            print_structured(&document)?;
        }
    }
    Ok(())
}

fn print_structured(document: &DeckDocument) -> Result<()> {
    let output = deck::deck_to_structured_output(document);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
