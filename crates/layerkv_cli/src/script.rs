//! Command language for scripts and the shell.
//!
//! One command per line:
//!
//! ```text
//! set <key> <value>     # value is JSON, or a bare string
//! get <key>
//! delete <key>
//! exists <key>
//! keys
//! begin | commit | rollback
//! stats | clear
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use layerkv_server::Request;
use serde_json::Value;

/// Parses one line into a request.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Request>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = split_word(line);
    let request = match command.to_ascii_lowercase().as_str() {
        "get" => Request::Get {
            key: single_key(command, rest)?,
        },
        "delete" | "del" => Request::Delete {
            key: single_key(command, rest)?,
        },
        "exists" => Request::Exists {
            key: single_key(command, rest)?,
        },
        "set" => {
            let (key, value) = split_word(rest);
            if key.is_empty() || value.is_empty() {
                return Err("usage: set <key> <value>".into());
            }
            Request::Set {
                key: key.to_string(),
                value: parse_value(value),
            }
        }
        "keys" => no_args(command, rest, Request::Keys)?,
        "begin" => no_args(command, rest, Request::Begin)?,
        "commit" => no_args(command, rest, Request::Commit)?,
        "rollback" => no_args(command, rest, Request::Rollback)?,
        "stats" => no_args(command, rest, Request::Stats)?,
        "clear" => no_args(command, rest, Request::Clear)?,
        _ => return Err(format!("unknown command: {command}")),
    };
    Ok(Some(request))
}

/// Parses a value as JSON, falling back to a plain string.
pub fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn single_key(command: &str, rest: &str) -> Result<String, String> {
    let (key, extra) = split_word(rest);
    if key.is_empty() || !extra.is_empty() {
        return Err(format!("usage: {command} <key>"));
    }
    Ok(key.to_string())
}

fn no_args(command: &str, rest: &str, request: Request) -> Result<Request, String> {
    if rest.is_empty() {
        Ok(request)
    } else {
        Err(format!("{command} takes no arguments"))
    }
}
