use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::system::snapshot::{BYTES_PER_GB, BYTES_PER_MB};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// `12.3GB`, the unit style used in findings and the status panel.
pub fn format_gb(bytes: u64) -> String {
    format!("{:.1}GB", bytes as f64 / BYTES_PER_GB)
}

pub fn format_mb(bytes: u64) -> String {
    format!("{:.0}MB", bytes as f64 / BYTES_PER_MB)
}

/// "D days, H hours, M minutes", dropping leading zero units.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    if days > 0 {
        format!("{days} days, {hours} hours, {minutes} minutes")
    } else if hours > 0 {
        format!("{hours} hours, {minutes} minutes")
    } else {
        format!("{minutes} minutes")
    }
}
