// src/exec.rs

//! Uniform wrapper around external tool invocations
//!
//! Every external call (git, docker, melange, yam, make) goes through
//! [`ExternalCommand`] so exit status, stdout, and stderr are captured the
//! same way everywhere and failure handling lives in one place instead of
//! being repeated per call site. Interactive sessions (the SDK container)
//! inherit the caller's stdio instead of capturing.
//!
//! No timeout is imposed here: the tool is a sequential, blocking wrapper
//! and a hung fetch is the wrapped tool's problem to interrupt.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of one external invocation
#[derive(Debug)]
pub struct CommandOutput {
    /// Exit code if the process exited normally
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with code 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Standard output with surrounding whitespace removed
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// One external tool invocation with an explicit working directory
#[derive(Debug)]
pub struct ExternalCommand {
    program: String,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl ExternalCommand {
    /// Start building an invocation of `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run with this working directory instead of the process's own
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        debug!(
            program = %self.program,
            args = ?self.args,
            cwd = ?self.cwd,
            "running external command"
        );
        cmd
    }

    /// Run and capture output, without judging the exit status.
    ///
    /// Used where a non-zero exit is an expected answer (e.g. probing
    /// whether a branch exists) rather than a failure.
    pub fn run_unchecked(&self) -> Result<CommandOutput> {
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| map_spawn_error(&self.program, e))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run and capture output, mapping non-zero exit to [`Error::External`]
    pub fn run(&self) -> Result<CommandOutput> {
        let output = self.run_unchecked()?;
        if output.success() {
            Ok(output)
        } else {
            Err(self.failure(&output))
        }
    }

    /// Run with inherited stdio for interactive sessions
    pub fn run_interactive(&self) -> Result<()> {
        let status = self
            .command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| map_spawn_error(&self.program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::External {
                tool: self.program.clone(),
                status: describe_code(status.code()),
                stderr: String::new(),
            })
        }
    }

    fn failure(&self, output: &CommandOutput) -> Error {
        Error::External {
            tool: self.program.clone(),
            status: describe_code(output.code),
            stderr: output.stderr.trim().to_string(),
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(n) => format!("exit code {n}"),
        None => "killed by signal".to_string(),
    }
}

fn map_spawn_error(program: &str, e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        Error::MissingTool(program.to_string())
    } else {
        Error::Io(e)
    }
}

/// Check that `tool` is on PATH before a workflow starts using it
pub fn require_tool(tool: &str) -> Result<PathBuf> {
    which::which(tool).map_err(|_| Error::MissingTool(tool.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn have(tool: &str) -> bool {
        which::which(tool).is_ok()
    }

    #[test]
    fn test_run_captures_stdout() {
        if !have("sh") {
            return;
        }
        let out = ExternalCommand::new("sh")
            .arg("-c")
            .arg("echo hello")
            .run()
            .unwrap();
        assert_eq!(out.stdout_trimmed(), "hello");
        assert!(out.success());
    }

    #[test]
    fn test_nonzero_exit_is_external_error() {
        if !have("sh") {
            return;
        }
        let err = ExternalCommand::new("sh")
            .arg("-c")
            .arg("echo oops >&2; exit 3")
            .run()
            .unwrap_err();
        match err {
            Error::External { tool, status, stderr } => {
                assert_eq!(tool, "sh");
                assert_eq!(status, "exit code 3");
                assert_eq!(stderr, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_run_unchecked_tolerates_failure() {
        if !have("sh") {
            return;
        }
        let out = ExternalCommand::new("sh")
            .arg("-c")
            .arg("exit 1")
            .run_unchecked()
            .unwrap();
        assert_eq!(out.code, Some(1));
        assert!(!out.success());
    }

    #[test]
    fn test_missing_program_maps_to_missing_tool() {
        let err = ExternalCommand::new("definitely-not-a-real-tool-xyz")
            .run_unchecked()
            .unwrap_err();
        assert!(matches!(err, Error::MissingTool(_)));
    }

    #[test]
    fn test_current_dir_applies() {
        if !have("pwd") {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let out = ExternalCommand::new("pwd")
            .current_dir(dir.path())
            .run()
            .unwrap();
        let reported = std::fs::canonicalize(out.stdout_trimmed()).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }
}
