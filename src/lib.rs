pub mod assistant;
pub mod ast;
pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod prompt;
pub mod repl;
