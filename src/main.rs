use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use simple_shell::assistant::{Assistant, CommandAssistant, OfflineAssistant};
use simple_shell::config::{Config, ConfigLoader};
use simple_shell::executor::ForkExecutor;
use simple_shell::io::input::InputHandler;
use simple_shell::prompt::{self, ShellPrompt};
use simple_shell::repl::Shell;

#[derive(Parser, Debug)]
#[command(name = "simsh")]
#[command(version, about = "A small interactive UNIX shell")]
struct Args {
    /// Settings file, defaults to ~/.simshrc
    #[arg(long, env = "SIMSH_CONFIG")]
    config: Option<PathBuf>,

    /// Tracing filter, overrides log_level from the settings file
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long)]
    no_banner: bool,

    /// Run a single line and exit
    #[arg(short = 'c', value_name = "LINE")]
    command: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match ConfigLoader::locate(args.config.as_deref()) {
        Some(path) => ConfigLoader::load_from_file(&path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };

    let log_level = args.log_level.as_deref().unwrap_or(config.log_level.as_str());
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let assistant: Box<dyn Assistant> = match config.assistant_command.clone().and_then(CommandAssistant::new) {
        Some(assistant) => Box::new(assistant),
        None => Box::new(OfflineAssistant),
    };
    let mut shell = Shell::new(ForkExecutor::new(), assistant).with_reply_limit(config.assistant_reply_limit);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(line) = args.command {
        let result = shell.handle_line(&line, &mut out);
        let _ = out.flush();
        return match result {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("simsh: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if config.show_banner && !args.no_banner {
        if let Err(e) = prompt::print_banner(&mut out) {
            error!(error = %e, "failed to print banner");
        }
    }

    info!("starting interactive shell");
    let prompt = ShellPrompt::new(config.prompt_format);
    let mut input = InputHandler::new(io::stdin().lock());
    match shell.run(&mut input, &prompt, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("simsh: {e}");
            ExitCode::FAILURE
        }
    }
}
