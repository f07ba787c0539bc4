// Disk usage via one `df` invocation per request

use crate::command;
use crate::error::CollectError;
use crate::models::{DiskFree, DiskFreeMap, DiskUsage};
use std::time::Duration;
use tracing::instrument;

pub struct DfRepo {
    program: String,
    timeout: Duration,
}

impl DfRepo {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Queries every key of `dfree` in one run and fills in the results.
    ///
    /// All-or-nothing: if the command fails or its output does not line up with the
    /// request, no entry is touched and all stay `Unresolved`. A path that resolves to a
    /// pseudo filesystem (an unmounted NBD node sits on devtmpfs) also stays `Unresolved`.
    #[instrument(skip_all, fields(repo = "df", operation = "fill_disk_free", paths = dfree.len()))]
    pub async fn fill_disk_free(&self, dfree: &mut DiskFreeMap) -> Result<(), CollectError> {
        if dfree.is_empty() {
            return Ok(());
        }
        let paths: Vec<String> = dfree.keys().cloned().collect();
        // No `-x`: excluded types would drop rows and break the one-row-per-path contract.
        let mut args: Vec<&str> = vec!["-B1", "--output=file,fstype,size,used,avail", "--"];
        args.extend(paths.iter().map(String::as_str));

        let stdout = command::run(&self.program, &args, self.timeout).await?;
        let usages =
            parse_df_output(&stdout, &paths).map_err(|reason| CollectError::UnexpectedOutput {
                program: self.program.clone(),
                reason,
            })?;
        for (path, usage) in paths.into_iter().zip(usages) {
            match usage {
                Some(usage) => {
                    dfree.insert(path, DiskFree::Usage(usage));
                }
                None => tracing::debug!(path = %path, "pseudo filesystem, left unresolved"),
            }
        }
        Ok(())
    }
}

/// Filesystem types that report the device node itself rather than its contents.
const PSEUDO_FSTYPES: &[&str] = &["tmpfs", "devtmpfs"];

/// Parses `df --output=file,fstype,size,used,avail` output positionally: one header line,
/// then exactly one row per requested path, in request order, each naming that path.
/// Rows on a pseudo filesystem yield `None`.
pub fn parse_df_output(output: &str, paths: &[String]) -> Result<Vec<Option<DiskUsage>>, String> {
    let lines: Vec<&str> = output.lines().collect();
    if lines.len() != paths.len() + 1 {
        return Err(format!(
            "expected {} lines (header + {} rows), got {}",
            paths.len() + 1,
            paths.len(),
            lines.len()
        ));
    }

    lines[1..]
        .iter()
        .zip(paths)
        .map(|(line, path)| {
            let row = parse_row(line).ok_or_else(|| format!("malformed row {:?}", line))?;
            if row.file != path.as_str() {
                return Err(format!("row for {:?} where {:?} was expected", row.file, path));
            }
            Ok((!PSEUDO_FSTYPES.contains(&row.fstype)).then_some(row.usage))
        })
        .collect()
}

struct Row<'a> {
    file: &'a str,
    fstype: &'a str,
    usage: DiskUsage,
}

/// Last four whitespace-separated columns are the type and three numbers; whatever precedes
/// them is the file, so paths containing spaces survive.
fn parse_row(line: &str) -> Option<Row<'_>> {
    let (rest, avail) = line.trim_end().rsplit_once(char::is_whitespace)?;
    let (rest, used) = rest.trim_end().rsplit_once(char::is_whitespace)?;
    let (rest, size) = rest.trim_end().rsplit_once(char::is_whitespace)?;
    let (file, fstype) = rest.trim_end().rsplit_once(char::is_whitespace)?;
    let file = file.trim();
    if file.is_empty() || fstype.is_empty() {
        return None;
    }
    Some(Row {
        file,
        fstype,
        usage: DiskUsage {
            size: size.parse().ok()?,
            used: used.parse().ok()?,
            avail: avail.parse().ok()?,
        },
    })
}
