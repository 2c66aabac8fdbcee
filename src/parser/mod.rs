pub mod builder;
pub mod scanner;

use tracing::debug;

use crate::ast::{Job, Plan};
use crate::error::ParseError;
use crate::lexer::TokenizedLine;
use builder::{RedirectMatch, build_pipeline, extract_redirect};
use scanner::find_pipe;

/// Turns a tokenized, non-built-in line into a launch plan.
///
/// Only one operator is honored per line. A redirection takes precedence over
/// a pipe; whatever is left over reaches the program as literal arguments.
pub fn plan(line: TokenizedLine) -> Result<Job, ParseError> {
    let TokenizedLine {
        command,
        background,
    } = line;

    let plan = match extract_redirect(&command) {
        RedirectMatch::Found {
            command: residual,
            redirect,
        } => {
            if residual.is_empty() {
                return Err(ParseError::MissingCommand {
                    operator: redirect.kind,
                });
            }
            Plan::Redirect {
                command: residual,
                redirect,
            }
        }
        RedirectMatch::MissingOperand { operator } => {
            return Err(ParseError::MissingOperand { operator });
        }
        RedirectMatch::NotFound => match find_pipe(&command) {
            Some(idx) => Plan::Pipeline(build_pipeline(&command, idx)?),
            None => Plan::Simple(command),
        },
    };

    debug!(?plan, background, "planned job");
    Ok(Job { plan, background })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Command, PipelineSpec, RedirectKind, RedirectSpec};
    use crate::lexer::tokenize;

    fn lex_and_plan(input: &str) -> Result<Job, ParseError> {
        plan(tokenize(input))
    }

    #[test]
    fn test_simple_command() {
        let job = lex_and_plan("ls -la").unwrap();
        assert_eq!(job.plan, Plan::Simple(Command::new(["ls", "-la"])));
        assert!(!job.background);
    }

    #[test]
    fn test_operator_free_line_is_unchanged() {
        let direct = tokenize("grep -rn needle src").command;
        let job = lex_and_plan("grep -rn needle src").unwrap();
        assert_eq!(job.plan, Plan::Simple(direct));
    }

    #[test]
    fn test_redirect_append_in_background() {
        let job = lex_and_plan("date >> log.txt &").unwrap();
        assert_eq!(
            job.plan,
            Plan::Redirect {
                command: Command::new(["date"]),
                redirect: RedirectSpec {
                    kind: RedirectKind::Append,
                    target: "log.txt".to_string(),
                },
            }
        );
        assert!(job.background);
    }

    #[test]
    fn test_pipeline() {
        let job = lex_and_plan("ls | wc -l").unwrap();
        assert_eq!(
            job.plan,
            Plan::Pipeline(PipelineSpec {
                left: Command::new(["ls"]),
                right: Command::new(["wc", "-l"]),
            })
        );
    }

    #[test]
    fn test_redirect_wins_over_pipe() {
        let job = lex_and_plan("ls | wc > out.txt").unwrap();
        assert_eq!(
            job.plan,
            Plan::Redirect {
                command: Command::new(["ls", "|", "wc"]),
                redirect: RedirectSpec {
                    kind: RedirectKind::Out,
                    target: "out.txt".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_missing_operand_is_parse_error() {
        assert_eq!(
            lex_and_plan("ls >"),
            Err(ParseError::MissingOperand {
                operator: RedirectKind::Out
            })
        );
    }

    #[test]
    fn test_missing_command_is_parse_error() {
        assert_eq!(
            lex_and_plan("< in.txt"),
            Err(ParseError::MissingCommand {
                operator: RedirectKind::In
            })
        );
    }

    #[test]
    fn test_empty_pipeline_side_is_parse_error() {
        assert!(lex_and_plan("| wc").is_err());
        assert!(lex_and_plan("ls |").is_err());
    }
}
