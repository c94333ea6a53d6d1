const MAX_VISIBLE_CHARS: usize = 100;

/// Shortens user text for logs and masks anything that looks like a credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let sanitized = if total_chars > MAX_VISIBLE_CHARS {
        let visible: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", visible, total_chars)
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&sanitized)
}

const REDACTED: &str = "[REDACTED]";

/// Prefixes whose following token is a credential. `sk-` is the DashScope
/// api key form, which users sometimes paste into questions.
const SECRET_PREFIXES: [&str; 6] = [
    "Bearer ",
    "sk-",
    "api_key=",
    "password=",
    "secret=",
    "token=",
];

fn redact_sensitive_patterns(text: &str) -> String {
    SECRET_PREFIXES
        .iter()
        .fold(text.to_string(), |acc, prefix| redact_after(&acc, prefix))
}

/// Replaces the token after every occurrence of `prefix`. A key prefix glued
/// to a preceding letter or digit (`task-`) is part of another word and left
/// alone; `name=` forms match anywhere.
fn redact_after(text: &str, prefix: &str) -> String {
    let mut redacted = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(prefix) {
        let value_start = idx + prefix.len();
        let glued = !prefix.ends_with('=')
            && rest[..idx]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());

        redacted.push_str(&rest[..value_start]);
        rest = &rest[value_start..];
        if glued {
            continue;
        }

        let value_end = rest.find(is_token_end).unwrap_or(rest.len());
        if value_end > 0 {
            redacted.push_str(REDACTED);
        }
        rest = &rest[value_end..];
    }

    redacted.push_str(rest);
    redacted
}

fn is_token_end(c: char) -> bool {
    c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ',' | ';' | ')' | '}')
}
