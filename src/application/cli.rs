use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::HistoryEntry;
use crate::domain::models::Reply;
use crate::domain::services::help_text;
use crate::domain::services::DIFFICULTIES;
use crate::infrastructure::backends::BackendManager;

/// What the interactive session needs from the command line beyond config.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionArgs {
    pub upload: Option<path::PathBuf>,
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No history yet.".to_string();
    }

    return entries
        .iter()
        .map(|e| return format!("- {}", e.filename))
        .collect::<Vec<String>>()
        .join("\n");
}

async fn print_history() -> Result<()> {
    let backend = BackendManager::get()?;
    match backend.list_documents().await {
        Reply::Data(entries) => {
            println!("{}", format_history(&entries));
        }
        Reply::AuthRequired { location } => {
            bail!(format!(
                "Sign in required. Open {location} in your browser, then set the session-cookie config."
            ));
        }
        Reply::Failed(failure) => {
            bail!(format!("Failed to fetch document history: {failure}"));
        }
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_history() -> Command {
    return Command::new("history").about("List documents previously processed by the service.");
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .long(ConfigKey::ApiURL.to_string())
        .env("DOCVAULT_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the document analysis service. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ))
        .global(true);
}

fn arg_difficulty() -> Arg {
    return Arg::new(ConfigKey::Difficulty.to_string())
        .short('d')
        .long(ConfigKey::Difficulty.to_string())
        .env("DOCVAULT_DIFFICULTY")
        .num_args(1)
        .help(format!(
            "Difficulty of generated quiz questions. [default: {}]",
            Config::default(ConfigKey::Difficulty)
        ))
        .value_parser(PossibleValuesParser::new(DIFFICULTIES))
        .global(true);
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("DOCVAULT_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before giving up on a request to the service. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ))
        .value_parser(value_parser!(u64).range(1..))
        .global(true);
}

fn arg_reset_quiz() -> Arg {
    return Arg::new(ConfigKey::ResetQuizOnDifficultyChange.to_string())
        .long(ConfigKey::ResetQuizOnDifficultyChange.to_string())
        .env("DOCVAULT_RESET_QUIZ_ON_DIFFICULTY_CHANGE")
        .num_args(1)
        .help(format!(
            "Start the quiz over when more questions are requested at a different difficulty. [default: {}]",
            Config::default(ConfigKey::ResetQuizOnDifficultyChange)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]))
        .global(true);
}

fn arg_session_cookie() -> Arg {
    return Arg::new(ConfigKey::SessionCookie.to_string())
        .long(ConfigKey::SessionCookie.to_string())
        .env("DOCVAULT_SESSION_COOKIE")
        .num_args(1)
        .help("Cookie header sent with every request, copied from a signed in browser session.")
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return format!("SESSION {line}").bold().underline().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("docvault")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_history())
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .num_args(1)
                .help("Document to upload as soon as the session starts."),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("DOCVAULT_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(arg_api_url())
        .arg(arg_difficulty())
        .arg(arg_request_timeout())
        .arg(arg_reset_quiz())
        .arg(arg_session_cookie());
}

fn session_args(matches: &ArgMatches) -> SessionArgs {
    return SessionArgs {
        upload: matches
            .get_one::<String>("file")
            .map(path::PathBuf::from),
    };
}

/// Handles one-shot subcommands. Returns the arguments of the interactive
/// session, or `None` when there is nothing left to run.
pub async fn parse() -> Result<Option<SessionArgs>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("history", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_history().await?;
            return Ok(None);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(Some(session_args(&matches)));
}
