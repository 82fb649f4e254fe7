//! Application command handlers for genrx-voice.
//!
//! # Commands
//! - `transcribe`: Submit an audio file as a transcription job and print the transcript
//! - `config`: Show, create or edit the configuration file
//! - `logs`: Display recent log entries

pub mod config;
pub mod logs;
pub mod transcribe;

pub use config::handle_config;
pub use logs::handle_logs;
pub use transcribe::handle_transcribe;
