// Worker process count via `ps`

use crate::command;
use crate::error::CollectError;
use std::time::Duration;
use tracing::instrument;

/// Linux truncates `comm` to 15 bytes.
const COMM_MAX_LEN: usize = 15;

pub struct ProcessRepo {
    program: String,
    name: String,
    timeout: Duration,
}

impl ProcessRepo {
    pub fn new(program: impl Into<String>, name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            name: name.into(),
            timeout,
        }
    }

    #[instrument(skip(self), fields(repo = "process", operation = "get_process_count", name = %self.name))]
    pub async fn get_process_count(&self) -> Result<u32, CollectError> {
        let stdout = command::run(&self.program, ["-A", "-o", "comm="], self.timeout).await?;
        Ok(count_processes(&stdout, &self.name))
    }
}

/// Counts `ps -o comm=` lines naming `name`. The `ps` process itself is never a match.
pub fn count_processes(listing: &str, name: &str) -> u32 {
    let truncated = name.get(..COMM_MAX_LEN).unwrap_or(name);
    let count = listing
        .lines()
        .map(str::trim)
        .filter(|comm| *comm == name || *comm == truncated)
        .count();
    count.min(u32::MAX as usize) as u32
}
