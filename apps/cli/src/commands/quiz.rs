//! Interactive quiz loop.

use super::{open_repository, read_text, strip_tags};
use crate::config::AppConfig;
use crate::remote::DeckClient;
use crate::QuizSource;
use anyhow::{bail, Context, Result};
use cloze_core::{deck, samples, KeywordMatcher, QuizSession};
use std::io::{self, BufRead, Write};

/// Tally of one pass through the queue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
}

impl QuizSummary {
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}

pub async fn execute(config: &AppConfig, source: QuizSource) -> Result<()> {
    let mut session = QuizSession::with_matcher(KeywordMatcher::from_settings(&config.matcher));
    load_source(&mut session, config, source).await?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let summary = run_quiz(&mut session, stdin.lock(), &mut stdout)?;

    tracing::info!(
        correct = summary.correct,
        incorrect = summary.incorrect,
        skipped = summary.skipped,
        "quiz finished"
    );
    Ok(())
}

async fn load_source(
    session: &mut QuizSession,
    config: &AppConfig,
    source: QuizSource,
) -> Result<()> {
    if let Some(path) = source.file {
        session.load_from_text(&read_text(&path)?);
    } else if let Some(id) = source.collection {
        let repo = open_repository(config)?;
        session.load_all_collections(&repo)?;
        let collection = session
            .collections()
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .with_context(|| format!("Collection not found: {id}"))?;
        session.load_from_collection(&collection);
    } else if let Some(name) = source.sample {
        let text = samples::get_sample(&name)
            .with_context(|| format!("Unknown sample {name:?}; run `cloze samples` to list them"))?;
        session.load_from_text(text);
    } else if let Some(id) = source.deck {
        let deck = DeckClient::new(&config.deck_api_url).fetch_deck(id).await?;
        session.load_from_collection(&deck::deck_to_collection(None, &deck));
    }
    Ok(())
}

/// Drive a loaded session from line input until `:quit` or end of input.
///
/// Blank lines re-prompt. Every verdict advances the cursor. Once the queue
/// is exhausted only `:retry` and `:quit` do anything.
pub fn run_quiz<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: R,
    out: &mut W,
) -> Result<QuizSummary> {
    if !session.has_loaded() {
        bail!("No questions found");
    }
    let (_, total) = session.state().progress();
    if total == 0 {
        bail!("No [bracketed] answers found");
    }

    writeln!(
        out,
        "{total} problems. Commands: :skip reveals the answer, :retry starts over, :quit exits."
    )?;

    let mut summary = QuizSummary::default();
    let mut announced_end = false;
    let mut lines = input.lines();

    loop {
        match session.current_problem() {
            Some(problem) => {
                let (done, total) = session.state().progress();
                write!(out, "\n[{}/{}] {}\n> ", done + 1, total, strip_tags(&problem.text))?;
            }
            None => {
                if !announced_end {
                    writeln!(
                        out,
                        "\nQuiz complete: {}/{} correct.",
                        summary.correct,
                        summary.answered()
                    )?;
                    writeln!(out, "Type :retry to start over or :quit to exit.")?;
                    announced_end = true;
                }
                write!(out, "> ")?;
            }
        }
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };
        let line = line.trim();

        match line {
            ":quit" | ":q" => break,
            ":retry" => {
                session.reload()?;
                summary = QuizSummary::default();
                announced_end = false;
                continue;
            }
            ":skip" => {
                if let Some(answer) = session.current_problem().map(|p| p.answer.clone()) {
                    writeln!(out, "Answer: {answer}")?;
                    summary.skipped += 1;
                    session.advance();
                }
                continue;
            }
            _ => {}
        }

        let expected = session.current_problem().map(|p| p.answer.clone());
        match session.evaluate_answer(line) {
            Ok(None) => continue,
            Ok(Some(report)) => {
                if report.is_match {
                    writeln!(out, "Correct!")?;
                    summary.correct += 1;
                } else {
                    writeln!(
                        out,
                        "Incorrect. Answer: {} ({}/{} keywords)",
                        expected.unwrap_or_default(),
                        report.matched_words,
                        report.total_words
                    )?;
                    summary.incorrect += 1;
                }
                session.advance();
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    writeln!(
        out,
        "Score: {}/{} correct, {} skipped.",
        summary.correct,
        summary.answered(),
        summary.skipped
    )?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn play(text: &str, answers: &str) -> (QuizSummary, String) {
        let mut session = QuizSession::new();
        session.load_from_text(text);
        let mut out = Vec::new();
        let summary = run_quiz(&mut session, Cursor::new(answers.to_string()), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn scores_answers_and_advances() {
        let (summary, out) = play(
            "The capital of Japan is [Tokyo].\nThe human body has [206] bones.",
            "tokyo\n207\n",
        );
        assert_eq!(
            summary,
            QuizSummary {
                correct: 1,
                incorrect: 1,
                skipped: 0
            }
        );
        assert!(out.contains("[1/2] The capital of Japan is _____."));
        assert!(out.contains("[2/2] The human body has _____ bones."));
        assert!(out.contains("Incorrect. Answer: 206 (0/1 keywords)"));
        assert!(out.contains("Quiz complete: 1/2 correct."));
    }

    #[test]
    fn blank_input_reprompts() {
        let (summary, out) = play("The capital of Japan is [Tokyo].", "\n   \nTokyo\n");
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.incorrect, 0);
        assert_eq!(out.matches("[1/1]").count(), 3);
    }

    #[test]
    fn answering_after_the_end_reports_exhaustion() {
        let (_, out) = play("[Tokyo]", "Tokyo\nagain\n:quit\n");
        assert!(out.contains("no current problem; reload to retry"));
    }

    #[test]
    fn retry_restarts_the_queue() {
        let (summary, out) = play("[Tokyo] and [Paris]", "x\ny\n:retry\nTokyo\nParis\n");
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.incorrect, 0);
        assert_eq!(out.matches("[1/2] _____ and Paris").count(), 2);
    }

    #[test]
    fn skip_reveals_answer() {
        let (summary, out) = play("<p>The Norse god of thunder is [Thor].</p>", ":skip\n");
        assert_eq!(summary.skipped, 1);
        assert!(out.contains("[1/1] The Norse god of thunder is _____."));
        assert!(out.contains("Answer: Thor"));
    }

    #[test]
    fn prompt_keeps_comparison_in_markup() {
        let (summary, out) = play("<p>Since 3 < 5 the answer is [8].</p>", "8\n");
        assert!(out.contains("[1/1] Since 3 < 5 the answer is _____."));
        assert_eq!(summary.correct, 1);
    }

    #[test]
    fn quit_stops_early() {
        let (summary, out) = play("[a] [b] [c]", "a\n:quit\nb\n");
        assert_eq!(summary.answered(), 1);
        assert!(!out.contains("[3/3]"));
    }

    #[test]
    fn text_without_answers_is_rejected() {
        let mut session = QuizSession::new();
        session.load_from_text("No blanks here.");
        let err = run_quiz(&mut session, Cursor::new(String::new()), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("No [bracketed] answers"));

        let mut empty = QuizSession::new();
        assert!(run_quiz(&mut empty, Cursor::new(String::new()), &mut Vec::new()).is_err());
    }

    #[tokio::test]
    async fn loads_builtin_sample() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let mut session = QuizSession::new();
        let source = QuizSource {
            file: None,
            collection: None,
            sample: Some("science".to_string()),
            deck: None,
        };
        load_source(&mut session, &config, source).await.unwrap();
        assert_eq!(session.state().problem_queue().len(), 9);
    }
}
