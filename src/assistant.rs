use std::process::{Command, Stdio};

use tracing::{debug, warn};

pub const ASSISTANT_TRIGGER: &str = "ai";

/// Turns a question into display-ready text. Never fails: problems come back
/// as the reply.
pub trait Assistant {
    fn respond(&self, prompt: &str, limit: usize) -> String;
}

/// Used when no assistant program is configured.
pub struct OfflineAssistant;

impl Assistant for OfflineAssistant {
    fn respond(&self, _prompt: &str, limit: usize) -> String {
        truncate(
            "The assistant is not configured. Set assistant_command in ~/.simshrc.",
            limit,
        )
        .to_string()
    }
}

/// Runs an external program with the question as its last argument and
/// answers with whatever it prints.
pub struct CommandAssistant {
    program: String,
    args: Vec<String>,
}

impl CommandAssistant {
    pub fn new(mut command: Vec<String>) -> Option<Self> {
        if command.is_empty() {
            return None;
        }
        let program = command.remove(0);
        Some(CommandAssistant {
            program,
            args: command,
        })
    }
}

impl Assistant for CommandAssistant {
    fn respond(&self, prompt: &str, limit: usize) -> String {
        debug!(program = %self.program, "asking assistant");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(prompt.trim_end())
            .stdin(Stdio::null())
            .output();

        let reply = match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).into_owned(),
            Ok(out) => {
                warn!(status = ?out.status.code(), "assistant exited with failure");
                format!(
                    "assistant failed ({}): {}",
                    out.status,
                    String::from_utf8_lossy(&out.stderr).trim_end()
                )
            }
            Err(e) => {
                warn!(error = %e, "assistant could not be started");
                format!("assistant unavailable: {}: {}", self.program, e)
            }
        };
        truncate(reply.trim_end(), limit).to_string()
    }
}

/// Longest prefix of `text` that fits in `limit` bytes.
pub fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("héllo", 2), "h");
    }

    #[test]
    fn test_command_assistant_echoes() {
        let assistant = CommandAssistant::new(vec!["echo".to_string(), "answer:".to_string()]).unwrap();
        assert_eq!(
            assistant.respond("what is rust ", 2048),
            "answer: what is rust"
        );
        assert_eq!(assistant.respond("what is rust ", 6), "answer");
    }

    #[test]
    fn test_command_assistant_missing_program() {
        let assistant = CommandAssistant::new(vec!["simsh-no-such-assistant".to_string()]).unwrap();
        assert!(assistant.respond("hi", 2048).starts_with("assistant unavailable"));
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(CommandAssistant::new(Vec::new()).is_none());
    }

    #[test]
    fn test_offline_assistant() {
        assert!(OfflineAssistant.respond("anything", 2048).contains("not configured"));
    }
}
