//! Text minifier used before embedding the consent configuration.
//!
//! Works on any JavaScript-like text (JSON included) in two stages:
//!
//! 1. strip `/* ... */` and `// ...` comments outside string literals;
//! 2. drop whitespace outside string literals, keeping one space only where
//!    two word characters would otherwise merge (`var x` stays `var x`).
//!
//! String literal contents (`"..."`, `'...'`, `` `...` ``) pass through
//! byte-for-byte, escapes included. Output is deterministic.

use crate::models::errors::{AppError, AppResult};

/// Comment-stripping state machine states
enum State {
    Normal,
    AfterSlash,
    InString(char),
    InStringEscape(char),
    InBlockComment,
    InBlockCommentEnd,
    InLineComment,
}

/// Stage 1: remove comments, leave everything else alone.
pub fn strip_comments(input: &str) -> AppResult<String> {
    let mut output = String::with_capacity(input.len());
    let mut state = State::Normal;

    for ch in input.chars() {
        state = match state {
            State::Normal => {
                output.push(ch);
                match ch {
                    '"' | '\'' | '`' => State::InString(ch),
                    '/' => State::AfterSlash,
                    _ => State::Normal,
                }
            }
            State::AfterSlash => match ch {
                '*' => {
                    output.pop();
                    State::InBlockComment
                }
                '/' => {
                    output.pop();
                    State::InLineComment
                }
                '"' | '\'' | '`' => {
                    output.push(ch);
                    State::InString(ch)
                }
                _ => {
                    // Division or regex: keep the char so the slash still has an operand.
                    output.push(ch);
                    State::Normal
                }
            },
            State::InString(quote) => {
                output.push(ch);
                if ch == '\\' {
                    State::InStringEscape(quote)
                } else if ch == quote {
                    State::Normal
                } else {
                    State::InString(quote)
                }
            }
            State::InStringEscape(quote) => {
                output.push(ch);
                State::InString(quote)
            }
            State::InBlockComment => {
                if ch == '*' {
                    State::InBlockCommentEnd
                } else {
                    State::InBlockComment
                }
            }
            State::InBlockCommentEnd => match ch {
                '/' => State::Normal,
                '*' => State::InBlockCommentEnd,
                _ => State::InBlockComment,
            },
            State::InLineComment => {
                if ch == '\n' || ch == '\r' {
                    output.push(ch);
                    State::Normal
                } else {
                    State::InLineComment
                }
            }
        };
    }

    match state {
        State::InString(_) | State::InStringEscape(_) => {
            Err(AppError::minify_failed("Unterminated string literal"))
        }
        State::InBlockComment | State::InBlockCommentEnd => {
            Err(AppError::minify_failed("Unterminated block comment"))
        }
        _ => Ok(output),
    }
}

/// Stage 2: collapse whitespace outside string literals.
pub fn collapse_whitespace(input: &str) -> AppResult<String> {
    let mut out = String::with_capacity(input.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut pending_space = false;

    for ch in input.chars() {
        if let Some(q) = quote {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space {
            maybe_push_space(&mut out, ch);
            pending_space = false;
        }

        if ch == '"' || ch == '\'' || ch == '`' {
            quote = Some(ch);
        }
        out.push(ch);
    }

    if quote.is_some() {
        return Err(AppError::minify_failed("Unterminated string literal"));
    }

    Ok(out)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

fn maybe_push_space(out: &mut String, next_char: char) {
    let Some(prev_char) = out.chars().last() else {
        return;
    };

    // `a + ++b` must not become `a+++b`
    if (prev_char == '+' && next_char == '+') || (prev_char == '-' && next_char == '-') {
        out.push(' ');
        return;
    }

    if is_word_char(prev_char) && is_word_char(next_char) {
        out.push(' ');
    }
}

/// Minify a text: strip comments, then collapse whitespace.
pub fn minify(input: &str) -> AppResult<String> {
    let no_comments = strip_comments(input)?;
    collapse_whitespace(&no_comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minify_pretty_json() {
        let input = "{\n  \"language\": \"en\",\n  \"services\": [ { \"name\": \"ga\" } ]\n}";
        assert_eq!(
            minify(input).unwrap(),
            r#"{"language":"en","services":[{"name":"ga"}]}"#
        );
    }

    #[test]
    fn test_preserve_spaces_in_strings() {
        let input = r#"{ "consentTitle": "We use  cookies // really" }"#;
        assert_eq!(
            minify(input).unwrap(),
            r#"{"consentTitle":"We use  cookies // really"}"#
        );
    }

    #[test]
    fn test_escaped_quotes_stay_inside_string() {
        let input = r#"{ "title": "say \"hi\"  there", "x": 1 }"#;
        assert_eq!(
            minify(input).unwrap(),
            r#"{"title":"say \"hi\"  there","x":1}"#
        );
    }

    #[test]
    fn test_trailing_escaped_backslash() {
        let input = r#"{ "path": "C:\\" , "n": 2 }"#;
        assert_eq!(minify(input).unwrap(), r#"{"path":"C:\\","n":2}"#);
    }

    #[test]
    fn test_strip_comments() {
        let input = "{ /* block */ \"a\": 1, // line\n \"b\": 2 }";
        assert_eq!(minify(input).unwrap(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_word_separation_kept() {
        assert_eq!(minify("var   x = a + ++b;").unwrap(), "var x=a+ ++b;");
    }

    #[test]
    fn test_division_survives() {
        let output = strip_comments("var a = x / y;").unwrap();
        assert_eq!(output, "var a = x / y;");
    }

    #[test]
    fn test_unterminated_input_is_error() {
        assert!(minify(r#"{"a": "open"#).is_err());
        assert!(minify("{ /* never closed").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let value = json!({
            "language": "en",
            "services": [
                {"name": "ga", "title": "Google Analytics", "purposes": ["analytics", "stats"]},
                {"name": "fb", "description": "Tab\tand \"quotes\" and /* not a comment */"}
            ],
            "default": false,
            "ratio": 0.5,
            "nested": {"empty": {}, "list": []}
        });
        let pretty = serde_json::to_string_pretty(&value).unwrap();
        let minified = minify(&pretty).unwrap();
        assert!(!minified.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&minified).unwrap();
        assert_eq!(parsed, value);
    }
}
