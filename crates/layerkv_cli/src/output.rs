//! Response rendering.

use clap::ValueEnum;
use layerkv_server::Response;
use serde_json::Value;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// One JSON object per line.
    Json,
}

/// Renders a response as a single line.
pub fn render(response: &Response, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(response)
            .unwrap_or_else(|err| format!(r#"{{"status":500,"body":{{"error":"{err}"}}}}"#)),
        OutputFormat::Text => render_text(response),
    }
}

fn render_text(response: &Response) -> String {
    if let Some(message) = response.error_message() {
        return format!("ERROR ({}): {message}", response.status);
    }

    let body = &response.body;
    if let Some(value) = body.get("value") {
        return value.to_string();
    }
    if let Some(keys) = body.get("keys").and_then(Value::as_array) {
        if keys.is_empty() {
            return "(empty)".into();
        }
        return keys
            .iter()
            .map(|key| key.as_str().map_or_else(|| key.to_string(), str::to_owned))
            .collect::<Vec<_>>()
            .join(" ");
    }
    if let Some(exists) = body.get("exists").and_then(Value::as_bool) {
        return exists.to_string();
    }
    if let Some(depth) = body.get("depth").and_then(Value::as_u64) {
        if body.get("status").is_some() {
            return format!("OK (depth {depth})");
        }
    }
    if body.get("status").is_some() {
        return "OK".into();
    }

    match body.as_object() {
        Some(fields) => fields
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" "),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkv_server::ServerError;
    use serde_json::json;

    #[test]
    fn text_rendering() {
        let text = |r: Response| render(&r, OutputFormat::Text);

        assert_eq!(text(Response::ok()), "OK");
        assert_eq!(text(Response::depth(2)), "OK (depth 2)");
        assert_eq!(text(Response::value(json!({"a": 1}))), r#"{"a":1}"#);
        assert_eq!(text(Response::value(json!("s"))), r#""s""#);
        assert_eq!(text(Response::keys(vec!["a".into(), "b".into()])), "a b");
        assert_eq!(text(Response::keys(vec![])), "(empty)");
        assert_eq!(text(Response::exists(true)), "true");
        assert_eq!(
            text(Response::from(ServerError::NotFound("k".into()))),
            "ERROR (404): key not found: k"
        );
    }

    #[test]
    fn json_rendering() {
        let line = render(&Response::exists(false), OutputFormat::Json);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, json!({"status": 200, "body": {"exists": false}}));
    }
}
