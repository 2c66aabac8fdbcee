use std::fmt;

/// An argument vector: index 0 is the program, the rest are its arguments.
/// Never holds an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    argv: Vec<String>,
}

impl Command {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            argv: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(|s| s.as_str())
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.argv.get(idx).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.argv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    /// Copy of the tokens in `range`, as an independent command.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Command {
        Command {
            argv: self.argv[range].to_vec(),
        }
    }

    /// Copy of this command with `count` tokens starting at `idx` removed.
    pub fn without(&self, idx: usize, count: usize) -> Command {
        let mut argv = self.argv.clone();
        let end = (idx + count).min(argv.len());
        argv.drain(idx.min(end)..end);
        Command { argv }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
    Append,
}

impl RedirectKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(RedirectKind::In),
            ">" => Some(RedirectKind::Out),
            ">>" => Some(RedirectKind::Append),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectKind::In => "<",
            RedirectKind::Out => ">",
            RedirectKind::Append => ">>",
        }
    }
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSpec {
    pub kind: RedirectKind,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSpec {
    pub left: Command,
    pub right: Command,
}

/// What the launcher has to build for one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Simple(Command),
    Redirect {
        command: Command,
        redirect: RedirectSpec,
    },
    Pipeline(PipelineSpec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub plan: Plan,
    pub background: bool,
}
