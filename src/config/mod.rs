//! Configuration management for genrx-voice.
//!
//! Settings are read from a TOML file in the user's config directory. The API
//! credential is never stored there; it is read from the process environment,
//! optionally populated from a `.env` file.

pub mod file;
pub mod secrets;

pub use file::{get_config_path, GenrxConfig, SpeechmaticsConfig};
pub use secrets::{get_api_key, load_dotenv, API_KEY_ENV};
