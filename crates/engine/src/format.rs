//! Record formatting: timestamp prefix and newline normalization.

use chrono::Local;

/// Wall-clock format used in the record prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Turn a raw message into a timestamped, newline-terminated record.
///
/// The result is `"[<timestamp>] - <raw>"` with exactly one trailing
/// newline; input that already ends in `\n` gains none. Pure apart from
/// reading the local clock.
pub fn format_record(raw: &str) -> String {
    let newline = if raw.ends_with('\n') { "" } else { "\n" };
    format!(
        "[{}] - {}{}",
        Local::now().format(TIMESTAMP_FORMAT),
        raw,
        newline
    )
}
