use super::{read_text, strip_tags};
use anyhow::Result;
use cloze_core::{parser, samples, SentenceWithClozes};
use std::path::PathBuf;

pub fn execute(file: PathBuf, json: bool) -> Result<()> {
    let text = read_text(&file)?;
    let sentences = parser::parse(text.trim());
    tracing::debug!(sentences = sentences.len(), "parsed {}", file.display());

    if json {
        println!("{}", serde_json::to_string_pretty(&sentences)?);
    } else {
        print!("{}", render(&sentences));
    }
    Ok(())
}

fn render(sentences: &[SentenceWithClozes]) -> String {
    let mut out = String::new();
    for (i, sentence) in sentences.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, strip_tags(&sentence.display_sentence)));
        for problem in &sentence.problems {
            out.push_str(&format!("   {} => {}\n", strip_tags(&problem.text), problem.answer));
        }
    }
    let total: usize = sentences.iter().map(|s| s.problems.len()).sum();
    out.push_str(&format!("{} sentences, {} problems\n", sentences.len(), total));
    out
}

pub fn list_samples() -> Result<()> {
    for (name, text) in samples::SAMPLES {
        let problems = parser::parse_problems(text.trim()).len();
        println!("{name:<20} {problems} problems");
    }
    Ok(())
}
