//! Stat fragment encoding and batch reply decoding.
//!
//! A batch reply is one `<battles>-<percent>` token per requested id,
//! comma separated, in request order. Ids are not echoed back, so the token
//! count must match exactly.

use crate::upstream::types::FetchError;

/// Fragment served in place of stats that could not be fetched.
pub const PLACEHOLDER_FRAGMENT: &str = r#"<user battles="1" wins="0"/>"#;

/// Escape text for use inside a double-quoted XML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Normalized fragment for one player.
pub fn user_fragment(nick: &str, battles: u64, wins_percent: &str) -> String {
    format!(
        r#"<user nick="{}" battles="{}" wins="{}"/>"#,
        escape_attr(nick),
        battles,
        escape_attr(wins_percent)
    )
}

/// Decode a batch reply into one fragment per requested id.
pub fn decode_batch(ids: &[String], reply: &str) -> Result<Vec<String>, FetchError> {
    let tokens: Vec<&str> = reply.trim().split(',').map(str::trim).collect();
    if tokens.len() != ids.len() {
        return Err(FetchError::Protocol(format!(
            "expected {} values, got {}",
            ids.len(),
            tokens.len()
        )));
    }

    ids.iter()
        .zip(tokens)
        .map(|(id, token)| decode_token(id, token))
        .collect()
}

fn decode_token(id: &str, token: &str) -> Result<String, FetchError> {
    let malformed = || FetchError::Protocol(format!("malformed value {:?} for {}", token, id));

    let (battles, percent) = token.split_once('-').ok_or_else(malformed)?;
    let battles: u64 = battles.trim().parse().map_err(|_| malformed())?;
    let percent = percent.trim();
    match percent.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(user_fragment(id, battles, percent)),
        _ => Err(malformed()),
    }
}
