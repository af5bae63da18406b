use super::*;

use std::sync::Mutex;

// Tests in this module mutate shared process env vars.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK`.
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_API_KEY_ENV");
        std::env::remove_var("LLM_OPENAI_MODE");
        std::env::remove_var("LLM_OPENAI_BASE_URL");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("OPENAI_API_KEY");
        std::env::remove_var("TEST_PHISH_KEY");
    }
}

#[test]
fn from_env_defaults_to_chat_completions() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENAI_API_KEY", "sk-default");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "sk-default");
    assert_eq!(cfg.model, "gpt-4o-mini");
    assert_eq!(cfg.openai_mode, OpenAiApiMode::ChatCompletions);
    assert_eq!(cfg.openai_base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(cfg.timeouts, LlmTimeouts::default());

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "TEST_PHISH_KEY");
        std::env::set_var("TEST_PHISH_KEY", "sk-test");
        std::env::set_var("LLM_OPENAI_MODE", "completions");
        std::env::set_var("LLM_OPENAI_BASE_URL", "https://example.test/v1/");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "sk-test");
    assert_eq!(cfg.model, "gpt-3.5-turbo-instruct");
    assert_eq!(cfg.openai_mode, OpenAiApiMode::Completions);
    assert_eq!(cfg.openai_base_url, "https://example.test/v1");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: Some(42), connect_secs: Some(7) });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_key_errors() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe { clear_llm_env() };

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "OPENAI_API_KEY"));
}

#[test]
fn from_env_blank_key_counts_as_missing() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENAI_API_KEY", "   ");
    }

    assert!(matches!(LlmConfig::from_env(), Err(LlmError::MissingApiKey { .. })));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_unknown_openai_mode_errors() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::set_var("LLM_OPENAI_MODE", "responses");
    }

    let err = LlmConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("unsupported openai_api mode"));

    unsafe { clear_llm_env() };
}

#[test]
fn unparsable_timeout_is_ignored() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "soon");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, None);

    unsafe { clear_llm_env() };
}
