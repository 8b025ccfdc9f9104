pub mod openai {
    pub const COMPLETION_MODEL: &str = "text-chat-davinci-002-20221122";
    pub const COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
}
