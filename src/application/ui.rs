#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use anyhow::Result;
use owo_colors::OwoColorize;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use super::cli::SessionArgs;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::services::AppState;
use crate::domain::services::Output;

fn format_chat(message: &Message) -> String {
    let author = message.author.to_string();
    let author = match message.author {
        Author::User => author.cyan().bold().to_string(),
        Author::Assistant => author.green().bold().to_string(),
        Author::System => author.red().bold().to_string(),
    };

    return format!("{author}: {}", message.plain_text());
}

fn print_output(output: &Output) {
    match output {
        Output::Heading(text) => println!("\n{}", text.bold().underline()),
        Output::Text(text) => println!("{text}"),
        Output::Notice(text) => println!("{}", text.yellow()),
        Output::Error(text) => eprintln!("{}", text.red()),
        Output::Chat(message) => println!("{}", format_chat(message)),
    }
}

/// Reads commands from stdin and prints session events until the user quits
/// or stdin closes.
pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    args: SessionArgs,
) -> Result<()> {
    let app_state = AppState::new(&Config::get(ConfigKey::Difficulty));

    println!(
        "{} Type /help for commands, or /upload PATH to get started.",
        "Docvault".bold()
    );

    tx.send(Action::Startup())?;
    if let Some(path) = args.upload {
        tx.send(Action::Upload(path))?;
    }

    return run(
        BufReader::new(tokio::io::stdin()),
        tx,
        rx,
        app_state,
        print_output,
    )
    .await;
}

/// Runs the session loop over `input`. On `/quit` it returns right away. When
/// input ends it closes the action queue and keeps rendering events until the
/// queued actions are done.
pub async fn run<R, P>(
    input: R,
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
    mut app_state: AppState,
    mut print: P,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    P: FnMut(&Output),
{
    let mut lines = input.lines();
    let mut input_closed = false;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => {
                        input_closed = true;
                        break;
                    }
                };

                let (should_break, outputs) = app_state.handle_input(&line, &tx)?;
                outputs.iter().for_each(&mut print);
                if should_break {
                    break;
                }
            }
            event = rx.recv() => {
                let event = match event {
                    Some(event) => event,
                    None => break,
                };

                tracing::debug!(event = ?event, "Rendering event");
                app_state.handle_event(event).iter().for_each(&mut print);
            }
        }
    }

    if !input_closed {
        return Ok(());
    }

    tracing::debug!("Input closed, waiting for queued actions");
    drop(tx);
    while let Some(event) = rx.recv().await {
        app_state.handle_event(event).iter().for_each(&mut print);
    }

    return Ok(());
}
