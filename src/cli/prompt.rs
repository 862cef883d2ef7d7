//! Interactive answer collection on the terminal

use std::io::BufRead;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use super::output::{answer_legend, print_warning};
use crate::models::{AnswerValue, Question};
use crate::questionnaire::AnswerPrompt;
use crate::{MatchQuizError, Result};

/// Lines typed ahead of the current question
const LINE_BUFFER: usize = 16;

/// Reads one answer per line from a blocking reader (stdin by default).
///
/// The reader runs on its own OS thread and hands lines over a channel.
/// A question that times out only stops waiting on the channel, so a read
/// still pending on the terminal never holds up runtime shutdown.
pub struct TerminalPrompt {
    lines: Mutex<mpsc::Receiver<std::io::Result<String>>>,
    timeout_secs: u64,
}

impl TerminalPrompt {
    pub fn stdin(timeout_secs: u64) -> Self {
        Self::new(std::io::BufReader::new(std::io::stdin()), timeout_secs)
    }

    pub fn new<R: BufRead + Send + 'static>(reader: R, timeout_secs: u64) -> Self {
        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        std::thread::spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                // Receiver gone: the questionnaire is over
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
            tracing::debug!("Answer reader thread finished");
        });

        Self {
            lines: Mutex::new(rx),
            timeout_secs,
        }
    }
}

#[async_trait]
impl AnswerPrompt for TerminalPrompt {
    async fn introduce(&self, total: usize) -> Result<()> {
        println!("💕 Welcome to the Questionnaire!");
        println!("Let's find your perfect match!");
        println!();
        println!("You'll answer {total} questions by typing one of:");
        println!("  🔵 4 / favorite - You love this!");
        println!("  🟢 3 / like - You enjoy this");
        println!("  🟡 2 / interested - Open to this");
        println!("  🔴 1 / no - Not for you");
        println!();
        println!("Take your time! ⏱️ {} seconds per question.", self.timeout_secs);
        Ok(())
    }

    async fn announce_category(&self, category: &str) -> Result<()> {
        println!();
        println!("📂 Category: {category}");
        println!("Answer the following questions in this category");
        Ok(())
    }

    async fn ask(&self, question: &Question, position: usize, total: usize) -> Result<AnswerValue> {
        println!();
        println!("Question {position} of {total}");
        println!("  {}", question.text);
        println!("  {}", answer_legend());

        // recv is cancel safe, so a deadline can drop this future at any await
        let mut lines = self.lines.lock().await;
        loop {
            let Some(line) = lines.recv().await else {
                return Err(MatchQuizError::Custom(
                    "Input closed before the questionnaire finished".to_string(),
                ));
            };
            let line = line?;
            match AnswerValue::parse_choice(&line) {
                Some(value) => return Ok(value),
                None => print_warning(&format!(
                    "'{}' is not an answer. Use 1-4, a label, or its initial.",
                    line.trim()
                )),
            }
        }
    }

    async fn timed_out(&self, _question: &Question) -> Result<()> {
        println!("⏱️ Time's up! Skipping this question...");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Read};
    use std::sync::mpsc as std_mpsc;
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::questionnaire::{collect_answer, AnswerOutcome};

    /// Reader that blocks like an idle terminal until its sender is dropped
    struct IdleTerminal(std_mpsc::Receiver<()>);

    impl Read for IdleTerminal {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            let _ = self.0.recv();
            Ok(0)
        }
    }

    fn question() -> Question {
        Question {
            id: 1,
            text: "Do you enjoy hiking?".to_string(),
            category: "Outdoors".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn skips_unrecognised_lines() {
        let input: &[u8] = b"maybe\n\nF\n2\n";
        let prompt = TerminalPrompt::new(input, 60);

        assert_eq!(prompt.ask(&question(), 1, 2).await.unwrap(), AnswerValue::Favorite);
        assert_eq!(prompt.ask(&question(), 2, 2).await.unwrap(), AnswerValue::Interested);
    }

    #[tokio::test]
    async fn closed_input_is_an_error() {
        let input: &[u8] = b"";
        let prompt = TerminalPrompt::new(input, 60);
        assert!(matches!(
            prompt.ask(&question(), 1, 1).await,
            Err(MatchQuizError::Custom(_))
        ));
    }

    #[test]
    fn timed_out_question_does_not_block_shutdown() {
        let (_keep_idle, idle) = std_mpsc::channel::<()>();
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let outcome = runtime
            .block_on(async {
                let prompt = TerminalPrompt::new(BufReader::new(IdleTerminal(idle)), 1);
                collect_answer(&prompt, &question(), 1, 1, Duration::from_millis(50)).await
            })
            .unwrap();
        assert_eq!(outcome, AnswerOutcome::TimedOut);

        let (done_tx, done_rx) = std_mpsc::channel();
        std::thread::spawn(move || {
            drop(runtime);
            let _ = done_tx.send(());
        });
        assert!(
            done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
            "runtime shutdown waited on the terminal"
        );
    }
}
