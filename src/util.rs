// Logging and formatting helpers shared by the view components.
use std::cell::Cell;

thread_local! {
    static DEBUG_LOG: Cell<bool> = const { Cell::new(false) };
}

pub fn set_debug_log(enabled: bool) {
    DEBUG_LOG.with(|flag| flag.set(enabled));
}

/// Debug-level console output; silent unless enabled through the view config.
pub fn clog(msg: &str) {
    if DEBUG_LOG.with(Cell::get) {
        gloo::console::log!(msg);
    }
}

/// `abcdef...wxyz` for ids longer than 12 characters.
pub fn short_tx_id(tx_id: &str) -> String {
    let chars: Vec<char> = tx_id.chars().collect();
    if chars.len() <= 12 {
        return tx_id.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

pub fn explorer_link(prefix: &str, tx_id: &str) -> String {
    format!("{prefix}{tx_id}")
}

/// Relative age of a unix-seconds timestamp.
pub fn time_ago(now_secs: i64, timestamp: i64) -> String {
    let diff = (now_secs - timestamp).max(0);
    if diff < 60 {
        format!("{}s ago", diff)
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86_400 {
        format!("{}h ago", diff / 3600)
    } else {
        format!("{}d ago", diff / 86_400)
    }
}

pub fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_long_ids_only() {
        assert_eq!(short_tx_id("abc"), "abc");
        assert_eq!(short_tx_id("123456789012"), "123456789012");
        assert_eq!(short_tx_id("5h3kLmNoPqRsTuVwXyZ9"), "5h3kLm...XyZ9");
    }

    #[test]
    fn relative_times() {
        assert_eq!(time_ago(100, 58), "42s ago");
        assert_eq!(time_ago(1000, 100), "15m ago");
        assert_eq!(time_ago(10_000, 0), "2h ago");
        assert_eq!(time_ago(200_000, 0), "2d ago");
        assert_eq!(time_ago(0, 50), "0s ago");
    }
}
