//! Interactive terminal loop: landing menu, then the MCQ flow.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::client::QuestionSource;
use crate::config::QuizConfig;
use crate::controller::QuizController;
use crate::render::{render_interview, render_landing, render_question, render_review};
use crate::session::{Action, Phase};

const QUIT: &str = ":q";

/// Line-based input paired with an output sink.
pub struct Terminal<R, W> {
    input: Lines<R>,
    output: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: input.lines(),
            output,
        }
    }

    /// Prints `prompt` and reads one trimmed line. `None` at end of input.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Runs the landing menu until the user quits or input ends.
pub async fn run<R, W>(
    terminal: &mut Terminal<R, W>,
    config: &QuizConfig,
    source: Arc<dyn QuestionSource>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        terminal.say(&render_landing())?;
        let Some(choice) = terminal.ask("> ").await? else {
            return Ok(());
        };

        match choice.to_ascii_lowercase().as_str() {
            "1" | "interview" => terminal.say(&render_interview(&config.interview_url))?,
            "2" | "mcq" => {
                if !run_mcq(terminal, source.clone()).await? {
                    return Ok(());
                }
            }
            "q" | "quit" | QUIT => return Ok(()),
            other => terminal.say(&format!("Unknown choice '{other}'"))?,
        }
    }
}

/// One MCQ visit. Returns `false` when input ended, `true` when the user
/// asked to go back to the landing menu.
async fn run_mcq<R, W>(
    terminal: &mut Terminal<R, W>,
    source: Arc<dyn QuestionSource>,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut controller = QuizController::new(source);
    terminal.say("AI MCQ Test Generator")?;

    loop {
        match controller.state().phase() {
            Phase::Idle => {
                if let Some(error) = controller.state().error() {
                    let message = format!("! {error}");
                    terminal.say(&message)?;
                }
                if !fill_form(terminal, &mut controller).await? {
                    return Ok(false);
                }
                if controller.state().form().description == QUIT {
                    return Ok(true);
                }
                terminal.say("Generating...")?;
                controller.generate().await?;
            }
            Phase::Loading => bail!("generation did not settle"),
            Phase::Answering => {
                let question = render_question(controller.state());
                terminal.say(&question)?;
                let Some(input) = terminal
                    .ask("Pick an option, 'n' for next (:q to quit): ")
                    .await?
                else {
                    return Ok(false);
                };

                let action = match input.to_ascii_lowercase().as_str() {
                    QUIT => return Ok(true),
                    "n" | "next" => Action::Next,
                    _ => Action::Select(
                        controller
                            .state()
                            .current_question()
                            .and_then(|question| question.option_key(&input))
                            .map_or(input.clone(), str::to_string),
                    ),
                };
                if let Err(e) = controller.dispatch(action) {
                    terminal.say(&e.to_string())?;
                }
            }
            Phase::Reviewing => {
                let review = render_review(controller.state());
                terminal.say(&review)?;
                match terminal.ask("'r' to restart (:q to go back): ").await? {
                    None => return Ok(false),
                    Some(input) if input.eq_ignore_ascii_case("r") => {
                        controller.dispatch(Action::Restart)?;
                    }
                    Some(input) if input == QUIT => return Ok(true),
                    Some(_) => {}
                }
            }
        }
    }
}

/// Collects description, count and difficulty. Returns `false` at end of input.
/// A description of `:q` is left in the form for the caller to act on.
async fn fill_form<R, W>(
    terminal: &mut Terminal<R, W>,
    controller: &mut QuizController,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    terminal.say("Paste the job description, then an empty line (:q to go back):")?;
    let mut lines = Vec::new();
    loop {
        match terminal.ask("").await? {
            None if lines.is_empty() => return Ok(false),
            None => break,
            Some(line) if line.is_empty() => break,
            Some(line) => {
                let quit = lines.is_empty() && line == QUIT;
                lines.push(line);
                if quit {
                    break;
                }
            }
        }
    }
    controller.dispatch(Action::EditDescription(lines.join("\n")))?;
    if controller.state().form().description == QUIT {
        return Ok(true);
    }

    let current = controller.state().form().num_questions;
    if let Some(input) = terminal.ask(&format!("Number of questions [{current}]: ")).await? {
        if !input.is_empty() {
            let outcome = match input.parse::<u32>() {
                Ok(n) => controller
                    .dispatch(Action::SetNumQuestions(n))
                    .map(|_| ())
                    .map_err(|e| e.to_string()),
                Err(_) => Err(format!("'{input}' is not a number")),
            };
            if let Err(message) = outcome {
                terminal.say(&format!("{message}; keeping {current}"))?;
            }
        }
    }

    let current = controller.state().form().difficulty;
    if let Some(input) = terminal
        .ask(&format!("Difficulty (easy/medium/hard) [{current}]: "))
        .await?
    {
        if !input.is_empty() {
            match input.parse() {
                Ok(difficulty) => {
                    controller.dispatch(Action::SetDifficulty(difficulty))?;
                }
                Err(message) => terminal.say(&format!("{message}; keeping {current}"))?,
            }
        }
    }

    Ok(true)
}
