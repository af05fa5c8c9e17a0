const MIB: f64 = 1024.0 * 1024.0;

/// Format bytes as MB, or GB once the value reaches 1024 MB.
///
/// The number is truncated to four characters instead of rounded:
/// - `0` -> `0.00 MB`
/// - `12.3456 MiB` -> `12.3 MB`
/// - `1.5 GiB` -> `1.50 GB`
pub fn format_size(bytes: u64) -> String {
    let mb = bytes as f64 / MIB;
    if mb >= 1024.0 {
        format!("{} GB", truncate_number(mb / 1024.0))
    } else {
        format!("{} MB", truncate_number(mb))
    }
}

/// Keep the first four characters of a six-decimal rendering.
///
/// A dangling `.` is dropped and the integer part is never cut.
fn truncate_number(value: f64) -> String {
    let text = format!("{:.6}", value);
    let int_len = text.find('.').unwrap_or(text.len());
    let keep = int_len.max(4).min(text.len());
    text[..keep].trim_end_matches('.').to_string()
}
