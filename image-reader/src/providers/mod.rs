//! Model API providers.
//!
//! Only OpenAI-compatible chat completion endpoints are supported; any
//! provider reachable through `OPENAI_BASE_URL` works.

pub mod openai;
