//! Message text normalization.
//!
//! Every channel collapses CR and CRLF to `\n` and trims. The WhatsApp channel
//! renders single-line bubbles, so it also folds line breaks and runs of
//! whitespace into one space. Both functions are idempotent.

use super::channel::Channel;

/// Normalize user-entered text for the given channel.
pub fn normalize(text: &str, channel: Channel) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    if channel.is_single_line() {
        collapse_whitespace(&unified)
    } else {
        unified.trim().to_string()
    }
}

/// Normalize assistant reply text for the given channel.
///
/// Replies sometimes carry escaped `\n` sequences instead of real line breaks;
/// on single-line channels those are folded too.
pub fn normalize_reply(text: &str, channel: Channel) -> String {
    if channel.is_single_line() {
        normalize(&text.replace("\\n", " "), channel)
    } else {
        normalize(text, channel)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
