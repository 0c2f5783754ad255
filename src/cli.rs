//! Helpers shared by the binaries.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::PromptError;

/// Parses a whole element count with an optional `k` (thousand) or `m` (million) suffix, e.g.
/// `500`, `100k`, `10M`.
///
/// Fractions, signs, exponents and counts that overflow `usize` are rejected.
pub fn parse_count(s: &str) -> Result<usize, String> {
    let lower = s.trim().to_ascii_lowercase();
    let (digits, multiplier) = if let Some(digits) = lower.strip_suffix('m') {
        (digits, 1_000_000u64)
    } else if let Some(digits) = lower.strip_suffix('k') {
        (digits, 1_000)
    } else {
        (lower.as_str(), 1)
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!(
            "invalid count '{s}': expected a whole number with an optional k or m suffix"
        ));
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| format!("count '{s}' is too large"))
}

/// Writes `message` to `output` and parses the next line of `input` as `T`.
pub fn prompt<R, W, T>(input: &mut R, output: &mut W, message: &str) -> Result<T, PromptError>
where
    R: BufRead,
    W: Write,
    T: FromStr,
    T::Err: Display,
{
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Eof);
    }

    let line = line.trim();
    line.parse().map_err(|err: T::Err| PromptError::Invalid {
        input: line.to_string(),
        reason: err.to_string(),
    })
}

/// Pins the current thread to the first available core. Returns the core id, `None` if there is
/// no core to pin to or the OS refused.
pub fn pin_to_first_core() -> Option<usize> {
    let Some(core) = core_affinity::get_core_ids().and_then(|ids| ids.into_iter().next()) else {
        tracing::warn!("no core ids available, running unpinned");
        return None;
    };

    let id = core.id;
    if core_affinity::set_for_current(core) {
        tracing::info!(core = id, "pinned to core");
        Some(id)
    } else {
        tracing::warn!(core = id, "failed to pin to core, running unpinned");
        None
    }
}
