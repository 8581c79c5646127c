//! The command contract: help text, explicit parameter list and a single executor.

use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::application::param::CliParam;
use crate::exitcode;

/// Error type executors may fail with. Anything implementing
/// `std::error::Error + Send + Sync` converts into it via `?`.
pub type ExecutorError = Box<dyn std::error::Error + Send + Sync>;

/// Result of running an executor: the process exit code.
pub type ExecResult = Result<i32, ExecutorError>;

/// A command (or verb) of a command-line application; e.g. in `git add .`
/// the word `add` is the command.
///
/// Parameters are declared as fields of type [`Param`](crate::Param) and
/// listed by [`params`](CliCommand::params); the executor reads their bound
/// values.
///
/// ```ignore
/// struct Greet {
///     name: Param<String>,
/// }
///
/// impl CliCommand for Greet {
///     fn params(&self) -> Vec<&dyn CliParam> {
///         vec![&self.name]
///     }
///
///     fn executor(&self) -> CommandExecutor<'_> {
///         CommandExecutor::from_action(move || {
///             println!("Hello {}", self.name.value()?);
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait CliCommand: Send + Sync {
    fn help_text(&self) -> Option<&str> {
        None
    }

    /// All parameters of this command, in display order.
    fn params(&self) -> Vec<&dyn CliParam> {
        Vec::new()
    }

    /// The command's body. Runs after all parameters have been bound.
    fn executor(&self) -> CommandExecutor<'_>;
}

type ExecutorFn<'a> = Box<dyn FnOnce() -> BoxFuture<'a, ExecResult> + Send + 'a>;

/// Zero-argument callback producing an exit code, sync or async.
pub struct CommandExecutor<'a> {
    run: ExecutorFn<'a>,
}

impl<'a> CommandExecutor<'a> {
    /// Executor returning the exit code directly.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> ExecResult + Send + 'a,
    {
        Self {
            run: Box::new(move || async move { f() }.boxed()),
        }
    }

    /// Executor without a result; exits with [`exitcode::OK`] on success.
    pub fn from_action<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<(), ExecutorError> + Send + 'a,
    {
        Self::new(move || f().map(|()| exitcode::OK))
    }

    /// `true` maps to [`exitcode::OK`], `false` to [`exitcode::FAILURE`].
    pub fn from_bool<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<bool, ExecutorError> + Send + 'a,
    {
        Self::new(move || f().map(exit_code_for))
    }

    /// Executor backed by a future.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = ExecResult> + Send + 'a,
    {
        Self {
            run: Box::new(move || f().boxed()),
        }
    }

    /// Async executor without a result.
    pub fn from_async_action<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<(), ExecutorError>> + Send + 'a,
    {
        Self::from_async(move || f().map(|result| result.map(|()| exitcode::OK)))
    }

    /// Run the callback. Consumes the executor, so it runs at most once.
    pub async fn execute(self) -> ExecResult {
        (self.run)().await
    }
}

fn exit_code_for(success: bool) -> i32 {
    if success {
        exitcode::OK
    } else {
        exitcode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn given_exit_code_closure_when_executed_then_code_returned() {
        let code = CommandExecutor::new(|| Ok(42)).execute().await.unwrap();
        assert_eq!(code, 42);
    }

    #[tokio::test]
    async fn given_action_when_executed_then_ok() {
        let calls = AtomicUsize::new(0);
        let executor = CommandExecutor::from_action(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(executor.execute().await.unwrap(), exitcode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn given_bool_closure_when_executed_then_mapped_to_exit_code() {
        let ok = CommandExecutor::from_bool(|| Ok(true)).execute().await.unwrap();
        let failed = CommandExecutor::from_bool(|| Ok(false))
            .execute()
            .await
            .unwrap();

        assert_eq!(ok, exitcode::OK);
        assert_eq!(failed, exitcode::FAILURE);
    }

    #[tokio::test]
    async fn given_async_closure_when_executed_then_awaited() {
        let executor = CommandExecutor::from_async(|| async {
            tokio::task::yield_now().await;
            Ok::<_, ExecutorError>(3)
        });

        assert_eq!(executor.execute().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn given_async_action_when_failing_then_error_propagates() {
        let executor = CommandExecutor::from_async_action(|| async {
            Err::<(), ExecutorError>("boom".into())
        });

        let err = executor.execute().await.unwrap_err();

        assert_eq!(err.to_string(), "boom");
    }
}
