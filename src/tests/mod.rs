//! Cross-module tests: HTTP-level provider tests and full analysis flows.

mod gemini_api;
