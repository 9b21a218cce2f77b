#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use domain::models::Action;
use domain::models::Event;
use domain::services::QuizResetPolicy;
use domain::services::SessionOrchestrator;
use infrastructure::backends::BackendManager;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tokio::task;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::ActionsService;

enum Finished {
    Actions(Result<(), Error>),
    Ui(Result<(), Error>),
}

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        format!(
            "Oh no! Docvault has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        )
        .red()
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("DOCVAULT_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("docvault")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("docvault")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let session_args = match cli::parse().await {
        Ok(Some(session_args)) => session_args,
        Ok(None) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    let policy = match QuizResetPolicy::parse(&Config::get(ConfigKey::ResetQuizOnDifficultyChange)) {
        Ok(policy) => policy,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    let backend = match BackendManager::get() {
        Ok(backend) => backend,
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let orchestrator = SessionOrchestrator::new(backend, Box::new(event_tx), policy);
    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(orchestrator, &mut action_rx).await;
    });

    let ui_future = ui::start(action_tx, event_rx, session_args);
    tokio::pin!(ui_future);

    // The actions task ends once the UI closes the queue. The UI may still be
    // rendering the last events at that point.
    let first = tokio::select!(
        res = background_futures.join_next() => Finished::Actions(match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        }),
        res = &mut ui_future => Finished::Ui(res),
    );

    let res = match first {
        Finished::Actions(Ok(())) => ui_future.await,
        Finished::Actions(Err(err)) => Err(err),
        Finished::Ui(res) => res,
    };

    if let Err(err) = res {
        handle_error(err);
    }

    process::exit(0);
}
