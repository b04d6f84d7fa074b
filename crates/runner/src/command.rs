use tokio::process::Command;
use tracing::debug;

use crate::RunnerError;

/// A command expressed as a structured argument vector.
///
/// Arguments go straight to the process-launch primitive; nothing is routed
/// through a shell, so values containing spaces or quotes need no escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    /// Creates a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument vector, program excluded.
    pub fn argv(&self) -> &[String] {
        &self.args
    }

    pub(crate) fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// True when the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `spec` to completion and captures its output.
///
/// Soft-fail: a non-zero exit code is reported through the returned
/// [`CommandOutput`], not as an error. Only a failure to launch the process
/// is an `Err`. Output is decoded as UTF-8, lossily. No timeout is applied;
/// a hanging command blocks the caller.
pub async fn run(spec: &CommandSpec) -> Result<CommandOutput, RunnerError> {
    debug!(program = %spec.program(), "running command");
    let output = spec.build().output().await.map_err(|source| {
        RunnerError::Launch {
            program: spec.program().to_string(),
            source,
        }
    })?;

    Ok(CommandOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Like [`run`], but a non-zero exit becomes [`RunnerError::NonZeroExit`]
/// carrying the captured output.
///
/// Callers that want the result even on failure should use [`run`] instead
/// of catching the error.
pub async fn run_checked(spec: &CommandSpec) -> Result<CommandOutput, RunnerError> {
    let output = run(spec).await?;
    if output.success() {
        Ok(output)
    } else {
        Err(RunnerError::NonZeroExit {
            program: spec.program().to_string(),
            output,
        })
    }
}
