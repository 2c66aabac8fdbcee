use std::io::Write;

use tracing::{debug, error, info, warn};

use crate::assistant::{ASSISTANT_TRIGGER, Assistant};
use crate::ast::Command;
use crate::error::{BuiltinError, ShellError};
use crate::executor::builtin::{BuiltinManager, BuiltinOutcome};
use crate::executor::{ChildStatus, Completion, Executor};
use crate::history::{HistorySlot, RECALL_MARKER};
use crate::io::input::{InputLine, LineSource};
use crate::lexer::{self, TokenizedLine};
use crate::parser;
use crate::prompt::ShellPrompt;

/// Lines that end the loop before anything else looks at them.
pub const TERMINATE_WORDS: [&str; 2] = ["exit", "quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Empty,
    Recall,
    Assistant,
    Dispatch,
}

impl LineKind {
    pub fn classify(command: &Command) -> Self {
        match command.program() {
            None => LineKind::Empty,
            Some(RECALL_MARKER) => LineKind::Recall,
            Some(ASSISTANT_TRIGGER) => LineKind::Assistant,
            Some(_) => LineKind::Dispatch,
        }
    }

    /// Only lines that go to dispatch are remembered. Recalling history
    /// never overwrites it, and assistant questions never reach it.
    pub fn is_recorded(self) -> bool {
        matches!(self, LineKind::Dispatch)
    }
}

pub struct Shell<E: Executor> {
    executor: E,
    builtins: BuiltinManager,
    history: HistorySlot,
    assistant: Box<dyn Assistant>,
    reply_limit: usize,
}

impl<E: Executor> Shell<E> {
    pub fn new(executor: E, assistant: Box<dyn Assistant>) -> Self {
        Shell {
            executor,
            builtins: BuiltinManager::new(),
            history: HistorySlot::new(),
            assistant,
            reply_limit: lexer::MAX_LINE_LENGTH * 2,
        }
    }

    pub fn with_reply_limit(mut self, limit: usize) -> Self {
        self.reply_limit = limit;
        self
    }

    pub fn history(&self) -> &HistorySlot {
        &self.history
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Read, dispatch and execute until end of input or `exit`.
    ///
    /// Non-fatal errors are reported on stderr and the loop carries on. Only
    /// a failure to create a process ends it with an error.
    pub fn run<S: LineSource>(
        &mut self,
        input: &mut S,
        prompt: &ShellPrompt,
        out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        loop {
            self.report_reaped(out)?;
            prompt.show_prompt(out)?;

            let raw = match input.next_line()? {
                InputLine::Line(line) => line,
                InputLine::Terminate => {
                    writeln!(out)?;
                    break;
                }
            };

            match self.handle_line(&raw, out) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(e) if e.is_fatal() => {
                    error!(error = %e, "fatal error, leaving the shell");
                    return Err(e);
                }
                Err(e) => {
                    warn!(error = %e, line = %raw, "line aborted");
                    eprintln!("simsh: {}", e);
                }
            }
        }
        info!("shell loop finished");
        Ok(())
    }

    /// One dispatch cycle for a raw line.
    pub fn handle_line(&mut self, raw: &str, out: &mut dyn Write) -> Result<LoopControl, ShellError> {
        if TERMINATE_WORDS.contains(&raw) {
            return Ok(LoopControl::Exit);
        }

        let line = lexer::tokenize(raw);
        let kind = LineKind::classify(&line.command);
        debug!(?kind, argv = ?line.command.argv(), background = line.background, "tokenized");

        if kind.is_recorded() {
            self.history.record(raw);
        }
        match kind {
            LineKind::Empty => Ok(LoopControl::Continue),
            LineKind::Recall => self.recall(out),
            LineKind::Assistant => {
                self.ask_assistant(&line.command, out)?;
                Ok(LoopControl::Continue)
            }
            LineKind::Dispatch => self.dispatch(line, out),
        }
    }

    fn recall(&mut self, out: &mut dyn Write) -> Result<LoopControl, ShellError> {
        let previous = self
            .history
            .last()
            .map(str::to_owned)
            .ok_or(BuiltinError::EmptyHistory)?;
        writeln!(out, "{}", previous)?;
        self.dispatch(lexer::tokenize(&previous), out)
    }

    fn ask_assistant(&self, command: &Command, out: &mut dyn Write) -> Result<(), ShellError> {
        let question: String = command.args().iter().map(|arg| format!("{} ", arg)).collect();
        let reply = self.assistant.respond(&question, self.reply_limit);
        writeln!(out, "\n🤖 AI says:\n{}", reply)?;
        Ok(())
    }

    /// Built-ins first, by program name alone; then the operators.
    fn dispatch(&mut self, line: TokenizedLine, out: &mut dyn Write) -> Result<LoopControl, ShellError> {
        let Some(program) = line.command.program() else {
            return Ok(LoopControl::Continue);
        };
        if let Some(status) = self.builtins.execute(program, line.command.args(), out) {
            return match status? {
                BuiltinOutcome::Continue => Ok(LoopControl::Continue),
                BuiltinOutcome::Exit => Ok(LoopControl::Exit),
            };
        }

        let job = parser::plan(line)?;
        let completion = self.executor.exec(&job)?;
        self.report_completion(completion, out)?;
        Ok(LoopControl::Continue)
    }

    fn report_completion(&self, completion: Completion, out: &mut dyn Write) -> Result<(), ShellError> {
        match completion {
            Completion::Detached(pid) => writeln!(out, "[{}]", pid)?,
            Completion::Finished(status) => {
                debug!(%status, "command finished");
                report_stopped(status, out)?;
            }
            Completion::Pipeline { left, right } => {
                debug!(%left, %right, "pipeline finished");
                report_stopped(left, out)?;
                report_stopped(right, out)?;
            }
        }
        Ok(())
    }

    fn report_reaped(&mut self, out: &mut dyn Write) -> Result<(), ShellError> {
        for reaped in self.executor.reap() {
            writeln!(out, "[{}] done ({})", reaped.pid, reaped.status)?;
        }
        Ok(())
    }
}

// A stopped child can't be resumed from here; say so and move on.
fn report_stopped(status: ChildStatus, out: &mut dyn Write) -> Result<(), ShellError> {
    if let ChildStatus::Stopped(sig) = status {
        writeln!(out, "simsh: process stopped by {}", sig)?;
    }
    Ok(())
}
