//! genrx-voice: voice search transcription for the genrx generic-medicine finder.
//!
//! The core is [`transcription::TranscriptionJobClient`], which uploads audio to
//! a job-based speech API, polls the job and returns the transcript. The
//! remaining modules provide the command-line front end around it.

pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod transcription;

pub use transcription::{transcribe_file, TranscriptionError, TranscriptionJobClient};
