// External command runner shared by the df and ps stages.

use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::CollectError;

/// Runs `program args...` without a shell, in the C locale, and returns stdout.
///
/// Non-zero exit, spawn failure and timeout are all errors. The child is killed if it is
/// still running when the timeout fires or the caller is dropped.
pub async fn run<I, S>(program: &str, args: I, timeout: Duration) -> Result<String, CollectError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let child = Command::new(program)
        .args(args)
        .env("LC_ALL", "C")
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(timeout, child)
        .await
        .map_err(|_| CollectError::CommandTimeout {
            program: program.to_string(),
            timeout,
        })?
        .map_err(|source| CollectError::CommandSpawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(CollectError::CommandFailed {
            program: program.to_string(),
            status: output.status,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
