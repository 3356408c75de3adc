use bytes::BytesMut;

/// Prefix that marks an input line as an authentication attempt.
/// Matched case-insensitively at the very start of the line.
pub const AUTH_PREFIX: &str = "auth:";

/// How much of an input line makes it into the log.
const DISPLAY_LIMIT: usize = 80;

/// What one complete input line means to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Starts with `auth:` (any casing); counts toward the threshold
    AuthAttempt(String),
    /// Decodable text that is not an attempt; observed and ignored
    Chatter(String),
    /// Not valid UTF-8; observed and ignored, never counted
    Binary,
}

/// Removes and returns the next complete line from the read buffer, without
/// its terminator. Handles both `\n` and `\r\n`. Returns `None` when no
/// complete line is buffered yet.
pub fn take_line(buffer: &mut BytesMut) -> Option<BytesMut> {
    let pos = buffer.iter().position(|&b| b == b'\n')?;
    let mut line = buffer.split_to(pos + 1);
    line.truncate(pos);
    if line.last() == Some(&b'\r') {
        line.truncate(pos - 1);
    }
    Some(line)
}

pub fn classify(raw: &[u8]) -> LineClass {
    match std::str::from_utf8(raw) {
        Ok(text) => {
            if is_auth_attempt(text) {
                LineClass::AuthAttempt(text.to_string())
            } else {
                LineClass::Chatter(text.to_string())
            }
        }
        Err(_) => LineClass::Binary,
    }
}

/// The prefix check runs on the line exactly as decoded: a leading space
/// before `auth:` disqualifies it.
fn is_auth_attempt(line: &str) -> bool {
    let prefix = AUTH_PREFIX.as_bytes();
    let bytes = line.as_bytes();
    bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Trims and truncates a line for logging. Display only; classification
/// never sees this form.
pub fn display_snippet(line: &str) -> String {
    let trimmed = line.trim();
    let mut out: String = trimmed.chars().take(DISPLAY_LIMIT).collect();
    if trimmed.chars().count() > DISPLAY_LIMIT {
        out.push_str("...");
    }
    out
}
