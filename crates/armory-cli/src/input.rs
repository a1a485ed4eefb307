//! Size-bounded input reading for commands that take a tooltip or text blob.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Read all of `file`, or stdin when `None`, refusing anything over `max_bytes`.
///
/// # Errors
///
/// Returns an error if the source cannot be read, is not UTF-8, or is larger
/// than `max_bytes`.
pub(crate) fn read_input(file: Option<&Path>, max_bytes: usize) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            let handle = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_bounded(handle, max_bytes)
                .with_context(|| format!("failed to read {}", path.display()))
        }
        None => read_bounded(std::io::stdin().lock(), max_bytes).context("failed to read stdin"),
    }
}

/// Reads at most `max_bytes + 1` bytes so oversized input is detected without
/// buffering all of it.
pub(crate) fn read_bounded<R: Read>(reader: R, max_bytes: usize) -> anyhow::Result<String> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut buf = Vec::new();
    reader.take(limit).read_to_end(&mut buf)?;

    if buf.len() > max_bytes {
        anyhow::bail!("input exceeds the {max_bytes}-byte limit (ARMORY_MAX_INPUT_BYTES)");
    }
    tracing::debug!(len = buf.len(), "input read");
    Ok(String::from_utf8(buf)?)
}
