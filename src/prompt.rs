use std::fmt::Write as _;
use std::io::{self, Write};

use chrono::{DateTime, Local};

const BANNER: &str = r"**********************************************************************
  #####                                    #####
 #     # # #    # #####  #      ######    #     # #    # ###### #      #
 #       # ##  ## #    # #      #         #       #    # #      #      #
  #####  # # ## # #    # #      #####      #####  ###### #####  #      #
       # # #    # #####  #      #               # #    # #      #      #
 #     # # #    # #      #      #         #     # #    # #      #      #
  #####  # #    # #      ###### ######     #####  #    # ###### ###### ######
**********************************************************************
";

pub struct ShellPrompt {
    format: String,
}

impl ShellPrompt {
    pub fn new(format: impl Into<String>) -> Self {
        ShellPrompt {
            format: format.into(),
        }
    }

    /// `<timestamp><user>:<cwd>> `
    pub fn render(&self, now: DateTime<Local>, user: &str, cwd: &str) -> String {
        let mut prompt = String::new();
        if write!(prompt, "{}", now.format(&self.format)).is_err() {
            prompt.clear();
        }
        prompt.push_str(user);
        prompt.push(':');
        prompt.push_str(cwd);
        prompt.push_str("> ");
        prompt
    }

    pub fn show_prompt(&self, out: &mut dyn Write) -> io::Result<()> {
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "?".to_string());
        let prompt = self.render(Local::now(), &current_user(), &cwd);
        out.write_all(prompt.as_bytes())?;
        out.flush()
    }
}

pub fn current_user() -> String {
    std::env::var("USER").unwrap_or_default()
}

pub fn print_banner(out: &mut dyn Write) -> io::Result<()> {
    out.write_all(BANNER.as_bytes())?;
    writeln!(out, "\n\n\nCurrent user: @{}", current_user())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_layout() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let prompt = ShellPrompt::new("%F %T ");
        assert_eq!(
            prompt.render(now, "alice", "/home/alice"),
            "2024-03-09 14:05:07 alice:/home/alice> "
        );
    }

    #[test]
    fn test_render_custom_format() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let prompt = ShellPrompt::new("[%H:%M] ");
        assert_eq!(prompt.render(now, "bob", "/tmp"), "[14:05] bob:/tmp> ");
    }

    #[test]
    fn test_banner_names_user() {
        let mut out = Vec::new();
        print_banner(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("****"));
        assert!(text.contains("Current user: @"));
    }
}
