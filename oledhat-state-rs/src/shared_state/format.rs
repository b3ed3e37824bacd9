use core::fmt::Write;

use heapless::String;

/// Formatted byte size, e.g. `"7.63 GB"`.
pub type ByteString = String<16>;

const SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with a base-1024 suffix.
///
/// The value is rounded half-up to two decimals and trailing zeros are
/// dropped, so 1536 becomes `"1.5 KB"` and 1024 becomes `"1 KB"`. Sizes
/// of a thousand terabytes and more stay in `TB`.
///
/// ```
/// use oledhat::shared_state::format_bytes;
///
/// assert_eq!(format_bytes(8_192_000_000).as_str(), "7.63 GB");
/// assert_eq!(format_bytes(0).as_str(), "0 B");
/// ```
pub fn format_bytes(size: u64) -> ByteString {
    let mut exponent = 0;
    let mut unit: u128 = 1;
    while exponent < SUFFIXES.len() - 1 && u128::from(size) >= unit * 1024 {
        unit *= 1024;
        exponent += 1;
    }

    // Integer half-up rounding to hundredths.
    let hundredths = (u128::from(size) * 100 + unit / 2) / unit;
    let whole = hundredths / 100;
    let fraction = hundredths % 100;

    let mut out = ByteString::new();
    // 20 digits of u64 plus a suffix always fit.
    let _ = write!(out, "{}", whole);
    if fraction != 0 {
        if fraction % 10 == 0 {
            let _ = write!(out, ".{}", fraction / 10);
        } else {
            let _ = write!(out, ".{:02}", fraction);
        }
    }
    let _ = write!(out, " {}", SUFFIXES[exponent]);
    out
}
