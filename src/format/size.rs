use crate::error::MIB;

const KIB: u64 = 1024;

/// Formats a byte count for the preview caption.
///
/// - below 1 KiB: `"<n> bytes"`
/// - below 1 MiB: KiB with one decimal, `" KB"`
/// - otherwise:   MiB with one decimal, `" MB"`
///
/// Halves round up (`1280` → `"1.3 KB"`), matching the page's number
/// formatting rather than Rust's round-half-to-even.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} bytes", bytes)
    } else if bytes < MIB {
        format!("{} KB", tenths(bytes, KIB))
    } else {
        format!("{} MB", tenths(bytes, MIB))
    }
}

/// `value / unit` rounded half-up to one decimal, computed exactly.
fn tenths(value: u64, unit: u64) -> String {
    let unit = unit as u128;
    let scaled = (value as u128 * 10 + unit / 2) / unit;
    format!("{}.{}", scaled / 10, scaled % 10)
}
