use crate::config::AppConfig;
use anyhow::Result;
use cloze_core::{KeywordMatcher, MatchReport};

pub fn execute(config: &AppConfig, answer: &str, input: &str, json: bool) -> Result<()> {
    let matcher = KeywordMatcher::from_settings(&config.matcher);
    let report = matcher.evaluate(answer, input);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render(&report));
    }
    Ok(())
}

fn render(report: &MatchReport) -> String {
    let verdict = if report.is_match { "correct" } else { "incorrect" };
    let mut out = format!(
        "{verdict} ({}/{} keywords matched)",
        report.matched_words, report.total_words
    );
    for keyword in &report.keywords {
        let status = match &keyword.matched_with {
            Some(word) => format!("matched {word:?}"),
            None => "missing".to_string(),
        };
        out.push_str(&format!("\n  {}: {status}", keyword.word));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_keywords() {
        let report = KeywordMatcher::new().evaluate("Mark Zuckerberg", "mark zuckerburg");
        assert_eq!(
            render(&report),
            "correct (2/2 keywords matched)\n  mark: matched \"mark\"\n  zuckerberg: matched \"zuckerburg\""
        );
    }

    #[test]
    fn renders_missing_keyword() {
        let report = KeywordMatcher::new().evaluate("Elon Musk", "elon");
        let text = render(&report);
        assert!(text.starts_with("incorrect (1/2"));
        assert!(text.contains("musk: missing"));
    }
}
