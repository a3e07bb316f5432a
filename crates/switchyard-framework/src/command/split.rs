use thiserror::Error;

/// Errors from [`shell_split`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),

    #[error("trailing backslash")]
    TrailingEscape,
}

/// Shell-like argument splitting for a command line.
///
/// Handles:
/// - Whitespace-separated arguments
/// - Single quotes (literal) and double quotes (backslash escapes allowed)
/// - Backslash escapes outside quotes
/// - Empty quoted arguments (`""` yields `""` as its own argument)
pub fn shell_split(input: &str) -> Result<Vec<String>, SplitError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;

    for ch in input.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if !in_single_quote => {
                escape_next = true;
                in_token = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
                in_token = true;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
                in_token = true;
            }
            c if c.is_whitespace() && !in_single_quote && !in_double_quote => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            _ => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if escape_next {
        return Err(SplitError::TrailingEscape);
    }
    if in_single_quote {
        return Err(SplitError::UnterminatedQuote('\''));
    }
    if in_double_quote {
        return Err(SplitError::UnterminatedQuote('"'));
    }
    if in_token {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_split_simple() {
        let args = shell_split("say hello world").unwrap();
        assert_eq!(args, vec!["say", "hello", "world"]);
    }

    #[test]
    fn test_shell_split_quoted() {
        let args = shell_split(r#"say "hello world" --words 'good bye'"#).unwrap();
        assert_eq!(args, vec!["say", "hello world", "--words", "good bye"]);
    }

    #[test]
    fn test_shell_split_mixed_quotes() {
        let args = shell_split(r#"cmd "double's quote" 'single"s quote'"#).unwrap();
        assert_eq!(args, vec!["cmd", "double's quote", r#"single"s quote"#]);
    }

    #[test]
    fn test_shell_split_escapes() {
        let args = shell_split(r#"say hello\ world "a \"b\"""#).unwrap();
        assert_eq!(args, vec!["say", "hello world", r#"a "b""#]);
    }

    #[test]
    fn test_shell_split_keeps_empty_quoted_argument() {
        let args = shell_split(r#"say "" x"#).unwrap();
        assert_eq!(args, vec!["say", "", "x"]);
    }

    #[test]
    fn test_shell_split_whitespace_only() {
        assert!(shell_split("   \t  ").unwrap().is_empty());
        assert!(shell_split("").unwrap().is_empty());
    }

    #[test]
    fn test_shell_split_unterminated() {
        assert_eq!(
            shell_split("say 'oops"),
            Err(SplitError::UnterminatedQuote('\''))
        );
        assert_eq!(shell_split("say oops\\"), Err(SplitError::TrailingEscape));
    }
}
