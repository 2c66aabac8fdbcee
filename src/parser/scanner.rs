use crate::ast::{Command, RedirectKind};

pub const PIPE_OPERATOR: &str = "|";

/// Index of the first `<`, `>` or `>>` token, if any.
pub fn find_redirect(command: &Command) -> Option<usize> {
    command
        .argv()
        .iter()
        .position(|token| RedirectKind::from_token(token).is_some())
}

/// Index of the first `|` token, if any.
pub fn find_pipe(command: &Command) -> Option<usize> {
    command.argv().iter().position(|token| token == PIPE_OPERATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_redirect_first_operator_wins() {
        let cmd = Command::new(["cat", "<", "in.txt", ">", "out.txt"]);
        assert_eq!(find_redirect(&cmd), Some(1));

        let cmd = Command::new(["ls", ">>", "log"]);
        assert_eq!(find_redirect(&cmd), Some(1));
    }

    #[test]
    fn test_find_redirect_not_found() {
        let cmd = Command::new(["echo", "a>b", ">>>"]);
        assert_eq!(find_redirect(&cmd), None);
        assert_eq!(find_redirect(&Command::default()), None);
    }

    #[test]
    fn test_find_pipe() {
        let cmd = Command::new(["ls", "|", "wc", "|", "cat"]);
        assert_eq!(find_pipe(&cmd), Some(1));
        assert_eq!(find_pipe(&Command::new(["ls", "||", "wc"])), None);
    }
}
