use std::collections::HashMap;
use std::io::Write;

use crate::error::BuiltinError;
use crate::executor::builtin::commands::{CdCommand, ExitCommand, HelpCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Continue,
    Exit,
}

pub type BuiltinStatus = Result<BuiltinOutcome, BuiltinError>;

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, args: &[String], out: &mut dyn Write) -> BuiltinStatus;
}

/// Commands handled inside the shell process, looked up before any fork.
pub struct BuiltinManager {
    commands: HashMap<String, Box<dyn BuiltinCommand>>,
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(HelpCommand));
        mgr.register(Box::new(ExitCommand));
        mgr
    }

    fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Runs `name` if it is a built-in. `None` means the caller should
    /// launch it as a program.
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        out: &mut dyn Write,
    ) -> Option<BuiltinStatus> {
        self.commands.get(name).map(|cmd| cmd.run(args, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_table() {
        let mgr = BuiltinManager::new();
        assert!(mgr.is_builtin("cd"));
        assert!(mgr.is_builtin("help"));
        assert!(mgr.is_builtin("exit"));
        assert!(!mgr.is_builtin("ls"));
        assert!(!mgr.is_builtin("quit"));
        assert!(!mgr.is_builtin("CD"));
    }

    #[test]
    fn test_execute_unknown_is_none() {
        let mgr = BuiltinManager::new();
        let mut out = Vec::new();
        assert!(mgr.execute("ls", &[], &mut out).is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_execute_exit() {
        let mgr = BuiltinManager::new();
        let mut out = Vec::new();
        let status = mgr.execute("exit", &[], &mut out).unwrap();
        assert_eq!(status.unwrap(), BuiltinOutcome::Exit);
    }
}
