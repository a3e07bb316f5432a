//! Command-line front end.
//!
//! The first argument is the action name. After it, `--key value` sets a
//! named attribute (kept with its dashes), `--key=value` does the same, a
//! `--flag` with no value becomes `"true"`, and everything else is a
//! positional segment. A bare `--` ends flag parsing. Single-dash tokens are
//! positional so negative numbers bind as segments.

use std::io::{self, Write};
use std::process::ExitCode;

use switchyard_core::{
    Failure, FailureKind, InvocationMode, InvocationRequest, InvocationResult, Payload,
};
use switchyard_framework::{Dispatcher, shell_split};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use super::{FrontendError, FrontendResult};

/// Exit code for input that never reached the dispatcher (`EX_USAGE`).
pub const USAGE_EXIT: u8 = 64;

const HELP_ACTION: &str = "help";

/// Builds a CLI request from arguments, program name excluded.
///
/// ```rust
/// use switchyard_runtime::frontend::cli::request_from_args;
///
/// let request = request_from_args(["say", "Hello", "--words", "Hi"]).unwrap();
/// assert_eq!(request.name(), "say");
/// assert_eq!(request.positional(), ["Hello"]);
/// assert_eq!(request.attr("--words"), Some("Hi"));
/// ```
pub fn request_from_args<I, S>(args: I) -> FrontendResult<InvocationRequest>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let name = args.next().ok_or(FrontendError::EmptyCommand)?;
    if name.is_empty() {
        return Err(FrontendError::EmptyCommand);
    }

    let mut builder = InvocationRequest::builder(name, InvocationMode::Cli);
    let mut flags_done = false;

    while let Some(arg) = args.next() {
        if flags_done || !is_flag(&arg) {
            builder = builder.arg(arg);
            continue;
        }
        if arg == "--" {
            flags_done = true;
            continue;
        }
        if let Some((key, value)) = arg.split_once('=') {
            builder = builder.attr(key, value);
            continue;
        }
        let value = match args.peek() {
            Some(next) if !is_flag(next) => args.next().unwrap_or_default(),
            _ => "true".to_string(),
        };
        builder = builder.attr(arg, value);
    }

    Ok(builder.build()?)
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with("--")
}

/// Shell-splits `line`, then builds a request as [`request_from_args`] does.
pub fn request_from_line(line: &str) -> FrontendResult<InvocationRequest> {
    request_from_args(shell_split(line)?)
}

/// Process exit code for a failure kind.
pub fn exit_code(kind: FailureKind) -> u8 {
    match kind {
        FailureKind::HandlerThrew => 1,
        FailureKind::NotFound => 2,
        FailureKind::ModeRejected => 3,
        FailureKind::MissingParameter => 4,
        FailureKind::BindingTypeMismatch => 5,
        FailureKind::AmbiguousMatch => 6,
    }
}

/// Dispatches `request`, answering `help [name]` from the registry when no
/// action named `help` is registered.
pub async fn execute(dispatcher: &Dispatcher, request: InvocationRequest) -> InvocationResult {
    let snapshot = dispatcher.registry().load();
    if request.name() != HELP_ACTION || snapshot.contains(HELP_ACTION) {
        return dispatcher.dispatch(request).await;
    }

    if request.positional().is_empty() {
        return InvocationResult::Success(Payload::Text(snapshot.help()));
    }
    let name = request.positional().join("/");
    debug!(action = %name, "Rendering help");
    match snapshot.help_for(&name) {
        Some(help) => InvocationResult::Success(Payload::Text(help)),
        None => InvocationResult::Failure(Failure::not_found(format!("no action named '{name}'"))),
    }
}

/// Writes a result the way a command-line tool reports it and returns the
/// exit code.
///
/// Payloads go to `stdout` followed by a newline (nothing for an empty
/// payload). Failures go to `stderr` with their cause chain.
pub fn write_result<O, E>(
    result: &InvocationResult,
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<u8>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    match result {
        InvocationResult::Success(Payload::Empty) => Ok(0),
        InvocationResult::Success(Payload::Bytes(bytes)) => {
            stdout.write_all(bytes)?;
            Ok(0)
        }
        InvocationResult::Success(payload) => {
            writeln!(stdout, "{}", payload.as_text().unwrap_or_default())?;
            Ok(0)
        }
        InvocationResult::Failure(failure) => {
            writeln!(stderr, "error: {}", failure.detail())?;
            let mut cause = failure.cause().map(|c| c as &dyn std::error::Error);
            while let Some(err) = cause {
                writeln!(stderr, "  caused by: {err}")?;
                cause = err.source();
            }
            Ok(exit_code(failure.kind()))
        }
    }
}

/// Runs one command-line invocation against `dispatcher`.
pub async fn run<I, S>(dispatcher: &Dispatcher, args: I) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let request = match request_from_args(args) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(USAGE_EXIT);
        }
    };

    let result = execute(dispatcher, request).await;
    let written = write_result(&result, &mut io::stdout().lock(), &mut io::stderr().lock());
    match written {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            warn!(error = %err, "Failed to write command output");
            ExitCode::FAILURE
        }
    }
}

/// Reads command lines from `input` until end of input or `exit`, writing
/// each result to `output`.
///
/// Blank lines and lines starting with `#` are skipped.
pub async fn repl<R, W>(dispatcher: &Dispatcher, input: R, mut output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        let mut buffer = Vec::new();
        match request_from_line(line) {
            Ok(request) => {
                let result = execute(dispatcher, request).await;
                let mut errors = Vec::new();
                write_result(&result, &mut buffer, &mut errors)?;
                buffer.extend(errors);
            }
            Err(err) => writeln!(buffer, "error: {err}")?,
        }
        output.write_all(&buffer).await?;
        output.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use switchyard_core::ActionError;
    use switchyard_framework::{ActionRegistry, Context, RegistryBuilder, action};

    use super::*;

    async fn say(ctx: Context) -> Result<String, ActionError> {
        Ok(ctx.require("words")?.to_string())
    }

    async fn say_words(words: String) -> String {
        words
    }

    async fn get_user(id: i64) -> String {
        format!("user {id}")
    }

    async fn explode() -> Result<(), ActionError> {
        Err(ActionError::context(
            "save failed",
            io::Error::other("disk on fire"),
        ))
    }

    fn dispatcher() -> Dispatcher {
        let mut builder = RegistryBuilder::new();
        builder
            .register_all([
                action("say").cli().help("Echo --words").handler(say),
                action("say").cli().params(["words"]).handler(say_words),
                action("users").get().params(["id"]).handler(get_user),
                action("explode").handler(explode),
            ])
            .unwrap();
        Dispatcher::new(Arc::new(ActionRegistry::with_snapshot(builder.build())))
    }

    #[test]
    fn args_split_into_positionals_and_attributes() {
        let request = request_from_args(["say", "Hello", "--words", "Hi"]).unwrap();
        assert_eq!(request.mode(), InvocationMode::Cli);
        assert_eq!(request.positional(), ["Hello"]);
        assert_eq!(request.attr("--words"), Some("Hi"));
    }

    #[test]
    fn flags_without_values_are_true() {
        let request = request_from_args(["build", "--release", "--target", "x86"]).unwrap();
        assert_eq!(request.attr("--release"), Some("true"));
        assert_eq!(request.attr("--target"), Some("x86"));

        let request = request_from_args(["build", "--verbose"]).unwrap();
        assert_eq!(request.attr("--verbose"), Some("true"));
    }

    #[test]
    fn double_dash_ends_flags() {
        let request = request_from_args(["say", "--", "--not-a-flag", "-5"]).unwrap();
        assert_eq!(request.positional(), ["--not-a-flag", "-5"]);
        assert!(request.named().is_empty());
    }

    #[test]
    fn equals_form_and_negative_numbers() {
        let request = request_from_args(["move", "-3", "--speed=fast"]).unwrap();
        assert_eq!(request.positional(), ["-3"]);
        assert_eq!(request.attr("--speed"), Some("fast"));
    }

    #[test]
    fn empty_input_is_a_usage_error() {
        assert_eq!(
            request_from_args(Vec::<String>::new()),
            Err(FrontendError::EmptyCommand)
        );
        assert!(matches!(
            request_from_line("say \"unterminated"),
            Err(FrontendError::Split(_))
        ));
    }

    #[test]
    fn lines_are_shell_split() {
        let request = request_from_line(r#"say "Hello world" --words 'a b'"#).unwrap();
        assert_eq!(request.positional(), ["Hello world"]);
        assert_eq!(request.attr("--words"), Some("a b"));
    }

    #[test]
    fn exit_codes_are_distinct() {
        let kinds = [
            FailureKind::NotFound,
            FailureKind::AmbiguousMatch,
            FailureKind::ModeRejected,
            FailureKind::MissingParameter,
            FailureKind::BindingTypeMismatch,
            FailureKind::HandlerThrew,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| exit_code(*k)).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(!codes.contains(&0));
        assert_eq!(exit_code(FailureKind::NotFound), 2);
    }

    #[tokio::test]
    async fn attributes_reach_context_pull_handlers() {
        let dispatcher = dispatcher();
        let request = request_from_args(["say", "--words", "Hi"]).unwrap();
        let result = execute(&dispatcher, request).await;
        assert_eq!(result.payload(), Some(&Payload::Text("Hi".into())));
    }

    #[tokio::test]
    async fn help_lists_overloads() {
        let dispatcher = dispatcher();
        let result = execute(&dispatcher, request_from_line("help say").unwrap()).await;
        assert_eq!(
            result.payload(),
            Some(&Payload::Text(
                "say [CLI] Echo --words\nsay <words:String> [CLI]".into()
            ))
        );

        let result = execute(&dispatcher, request_from_line("help nope").unwrap()).await;
        assert_eq!(result.failure_kind(), Some(FailureKind::NotFound));
    }

    #[test]
    fn failures_print_detail_and_causes() {
        let dispatcher = dispatcher();
        let request = request_from_line("explode").unwrap();
        let result = tokio_test::block_on(execute(&dispatcher, request));

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = write_result(&result, &mut out, &mut err).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("error: save failed"));
        assert!(err.contains("caused by: disk on fire"));
    }

    #[test]
    fn mode_rejection_exit_code() {
        let dispatcher = dispatcher();
        let request = request_from_line("users 7").unwrap();
        let result = tokio_test::block_on(execute(&dispatcher, request));
        let code = write_result(&result, &mut io::sink(), &mut io::sink()).unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn repl_runs_each_line() {
        let dispatcher = dispatcher();
        let input: &[u8] = b"say Hello\n\n# comment\nsay\nbogus\"\nexit\nsay never\n";
        let mut output = Vec::new();
        repl(&dispatcher, input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Hello");
        assert!(lines[1].starts_with("error: missing required parameter 'words'"));
        assert!(lines[2].starts_with("error: invalid command line"));
        assert_eq!(lines.len(), 3);
    }
}
