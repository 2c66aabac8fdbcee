use std::io::Write;

use crate::error::BuiltinError;
use crate::executor::builtin::manager::{BuiltinCommand, BuiltinOutcome, BuiltinStatus};

const HELP_OVERVIEW: &str = "\
SIMPLE SHELL
A small UNIX command interpreter.

Usage: help [command name] for more information on a built-in.

Built-in commands:
  cd <directory>     Change the current working directory
  help [command]     Show this text, or the usage of one built-in
  exit               Leave the shell

Operators (one per line):
  cmd > file         Write stdout to file, truncating it
  cmd >> file        Append stdout to file
  cmd < file         Read stdin from file
  cmd1 | cmd2        Feed cmd1's stdout into cmd2's stdin
  cmd &              Run cmd without waiting for it

  !!                 Run the previous command again
  ai <question>      Ask the assistant
";

const HELP_CD: &str = "\
cd <directory>
  Change the shell's working directory to <directory>.
  The directory argument is required.
";

const HELP_HELP: &str = "\
help [command]
  Without arguments, list the built-ins and operators.
  With a built-in name, show its usage.
";

const HELP_EXIT: &str = "\
exit
  Leave the shell after the current line. `quit` and end-of-input also leave.
";

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, args: &[String], _out: &mut dyn Write) -> BuiltinStatus {
        let Some(target) = args.first() else {
            return Err(BuiltinError::MissingArgument { builtin: "cd" });
        };
        std::env::set_current_dir(target).map_err(|source| BuiltinError::ChangeDir {
            path: target.clone(),
            source,
        })?;
        Ok(BuiltinOutcome::Continue)
    }
}

pub struct HelpCommand;

impl BuiltinCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }
    fn run(&self, args: &[String], out: &mut dyn Write) -> BuiltinStatus {
        let text = match args.first().map(|s| s.as_str()) {
            None => HELP_OVERVIEW,
            Some("cd") => HELP_CD,
            Some("help") => HELP_HELP,
            Some("exit") => HELP_EXIT,
            Some(other) => return Err(BuiltinError::UnknownTopic(other.to_string())),
        };
        out.write_all(text.as_bytes())?;
        Ok(BuiltinOutcome::Continue)
    }
}

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn run(&self, _args: &[String], _out: &mut dyn Write) -> BuiltinStatus {
        Ok(BuiltinOutcome::Exit)
    }
}
