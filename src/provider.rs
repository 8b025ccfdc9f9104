pub mod constants;

pub use constants::openai::{API_KEY_ENV_VAR, COMPLETION_MODEL, COMPLETIONS_URL};
