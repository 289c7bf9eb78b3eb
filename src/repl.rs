use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::TurnError;
use crate::gateway::InferenceBackend;
use crate::session::ConversationSession;

pub const GOODBYE: &str = "Goodbye! Thanks for chatting!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Reset,
    Skip,
    Prompt(&'a str),
}

pub fn parse_command(line: &str) -> Command<'_> {
    let input = line.trim();
    if input.is_empty() {
        return Command::Skip;
    }
    if ["quit", "exit", "bye"]
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
    {
        return Command::Quit;
    }
    if input.eq_ignore_ascii_case("reset") {
        return Command::Reset;
    }
    Command::Prompt(input)
}

pub fn render_reply(outcome: &Result<String, TurnError>) -> String {
    match outcome {
        Ok(reply) => reply.trim().to_string(),
        Err(err) => format!("Error: {err}"),
    }
}

pub fn print_banner(out: &mut impl Write, model_id: &str) -> Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "{rule}")?;
    writeln!(out, "AWS Bedrock Chatbot")?;
    writeln!(out, "model: {model_id}")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "\nCommands:")?;
    writeln!(out, "  - Type your message and press Enter to chat")?;
    writeln!(out, "  - Type 'reset' to clear conversation history")?;
    writeln!(out, "  - Type 'quit', 'exit' or 'bye' to end the conversation")?;
    writeln!(out, "\n{rule}\n")?;
    Ok(())
}

pub async fn run_repl<B, R, W>(
    session: &mut ConversationSession<B>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    B: InferenceBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "You: ")?;
        out.flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            writeln!(out)?;
            break;
        };

        match parse_command(&line) {
            Command::Skip => continue,
            Command::Quit => {
                writeln!(out, "\n{GOODBYE}\n")?;
                break;
            }
            Command::Reset => {
                session.reset();
                writeln!(out, "\nConversation history cleared!\n")?;
            }
            Command::Prompt(prompt) => {
                write!(out, "\nAssistant: ")?;
                out.flush().context("Failed to flush stdout")?;
                let outcome = session.send_turn(prompt).await;
                writeln!(out, "{}\n", render_reply(&outcome))?;
            }
        }
    }

    Ok(())
}
