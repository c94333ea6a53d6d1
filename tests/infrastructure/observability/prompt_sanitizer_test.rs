use question_relay::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_question_when_sanitizing_then_returns_unchanged() {
    let question = "When does train G101 depart?";
    assert_eq!(sanitize_prompt(question), question);
}

#[test]
fn given_long_question_when_sanitizing_then_truncates_with_length() {
    let question = "a".repeat(150);
    let result = sanitize_prompt(&question);
    assert!(result.contains("... (150 chars total)"));
    assert!(result.starts_with(&"a".repeat(100)));
}

#[test]
fn given_long_multibyte_question_when_sanitizing_then_truncates_on_char_boundary() {
    let question = "北京到上海的高铁".repeat(20);
    let result = sanitize_prompt(&question);
    assert!(result.contains("... (160 chars total)"));
    assert!(result.starts_with(&question.chars().take(100).collect::<String>()));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz");
    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_api_key_when_sanitizing_then_redacts_key() {
    let result = sanitize_prompt("Send request with api_key=secret123");
    assert!(result.contains("api_key=[REDACTED]"));
    assert!(!result.contains("secret123"));
}

#[test]
fn given_repeated_secrets_when_sanitizing_then_redacts_every_occurrence() {
    let result = sanitize_prompt("token=aaa111 and again token=bbb222&password=hunter2");
    assert!(!result.contains("aaa111"));
    assert!(!result.contains("bbb222"));
    assert!(!result.contains("hunter2"));
    assert_eq!(result.matches("[REDACTED]").count(), 3);
}

#[test]
fn given_dashscope_key_in_question_when_sanitizing_then_redacts_key() {
    let result = sanitize_prompt("my key is sk-4f9a2b7c, why does G101 fail? also sk-0d1e");
    assert_eq!(
        result,
        "my key is sk-[REDACTED], why does G101 fail? also sk-[REDACTED]"
    );
}

#[test]
fn given_word_ending_in_sk_when_sanitizing_then_leaves_it_alone() {
    let question = "Is there a task-force desk at Beijing South?";
    assert_eq!(sanitize_prompt(question), question);
}
