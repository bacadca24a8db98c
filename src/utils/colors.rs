/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

fn is_blank(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == "--:--" || v == "00:00"
}

/// Grey for placeholders, untouched otherwise.
pub fn colorize_optional(value: &str) -> String {
    if is_blank(value) {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Balance color for server strings such as `"-01:20"` or `"+00:45"`:
/// red when negative, green when positive, plain at zero.
pub fn color_for_balance(value: &str) -> &'static str {
    let v = value.trim();
    if is_blank(v) || v.trim_start_matches(['+', '-']) == "00:00" {
        RESET
    } else if v.starts_with('-') {
        RED
    } else {
        GREEN
    }
}

pub fn colorize_balance(value: &str) -> String {
    format!("{}{}{}", color_for_balance(value), value, RESET)
}
