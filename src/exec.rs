//! Synchronous invocation of the external evaluator and post-processor.

use crate::error::{Result, SweepError};
use std::ffi::OsStr;
use std::process::Command;

/// A command template from configuration: a program name plus its fixed
/// arguments, split on whitespace.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn parse(command: &str) -> Result<Self> {
        let mut tokens = command.split_whitespace().map(String::from);
        let program = tokens
            .next()
            .ok_or_else(|| SweepError::Config("empty command".to_string()))?;
        Ok(Self {
            program,
            args: tokens.collect(),
        })
    }

    /// Run the command to completion, optionally appending one extra
    /// argument, and capture stdout as text.
    ///
    /// A non-zero exit status or stderr chatter is logged but not fatal: the
    /// caller feeds whatever stdout produced into the report parser as-is,
    /// and a truncated or empty report surfaces there.
    pub fn run(&self, extra_arg: Option<&OsStr>) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(arg) = extra_arg {
            cmd.arg(arg);
        }

        log::debug!("running '{}' with {} arg(s)", self.program, self.args.len());
        let output = cmd.output().map_err(|e| {
            SweepError::Command(format!("failed to run '{}': {}", self.program, e))
        })?;

        if !output.status.success() {
            log::warn!("'{}' exited with {}", self.program, output.status);
        }
        if !output.stderr.is_empty() {
            log::debug!(
                "'{}' stderr: {}",
                self.program,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}
