// src/sheet/envelope.rs
//
// The visualization endpoint wraps its JSON in a JavaScript callback:
// `/*O_o*/\ngoogle.visualization.Query.setResponse({...});`

use anyhow::{bail, Context, Result};

use super::types::{QueryResponse, RawTable};

/// Characters of callback preamble before the JSON object.
pub const PREFIX_LEN: usize = 47;
/// Characters of callback epilogue after it (`);`).
pub const SUFFIX_LEN: usize = 2;

/// Cut the fixed-length framing off `body`. Lengths are in characters.
pub fn strip_envelope(body: &str) -> Result<&str> {
    let total = body.chars().count();
    if total < PREFIX_LEN + SUFFIX_LEN {
        bail!(
            "response too short for envelope framing: {} chars, need at least {}",
            total,
            PREFIX_LEN + SUFFIX_LEN
        );
    }

    let start = byte_offset(body, PREFIX_LEN);
    let end = byte_offset(body, total - SUFFIX_LEN);
    Ok(&body[start..end])
}

/// Strip the framing and decode the table.
pub fn parse_envelope(body: &str) -> Result<RawTable> {
    let json = strip_envelope(body)?;
    let resp: QueryResponse =
        serde_json::from_str(json).context("decoding visualization payload")?;
    Ok(resp.table)
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The preamble the live endpoint sends; exactly 47 characters.
    const PREAMBLE: &str = "/*O_o*/\ngoogle.visualization.Query.setResponse(";

    fn wrap(json: &str) -> String {
        format!("{}{});", PREAMBLE, json)
    }

    #[test]
    fn preamble_matches_prefix_len() {
        assert_eq!(PREAMBLE.chars().count(), PREFIX_LEN);
    }

    #[test]
    fn strips_framing() -> Result<()> {
        let body = wrap(r#"{"table":{"rows":[]}}"#);
        assert_eq!(strip_envelope(&body)?, r#"{"table":{"rows":[]}}"#);
        Ok(())
    }

    #[test]
    fn counts_characters_not_bytes() -> Result<()> {
        let prefix: String = "ç".repeat(PREFIX_LEN);
        let body = format!("{}{{}}ã;", prefix);
        assert_eq!(strip_envelope(&body)?, "{}");
        Ok(())
    }

    #[test]
    fn short_body_fails() {
        assert!(strip_envelope("oops").is_err());
    }

    #[test]
    fn decodes_rows() -> Result<()> {
        let body = wrap(r#"{"status":"ok","table":{"rows":[{"c":[{"v":"Acme"}]}]}}"#);
        let table = parse_envelope(&body)?;
        assert_eq!(table.rows.len(), 1);
        Ok(())
    }

    #[test]
    fn invalid_json_fails() {
        let body = wrap(r#"{"table": [1, 2"#);
        assert!(parse_envelope(&body).is_err());
        let body = wrap(r#"{"status":"error","errors":[]}"#);
        assert!(parse_envelope(&body).is_err());
    }
}
