//! Gladiator Integration - Narrative generation client
//!
//! Talks to a generative text API to write character backstories. Requests run
//! on a background tokio runtime and are polled through [`PendingRequest`];
//! any failure is replaced by a fixed fallback line.

pub mod backstory;
pub mod client;
pub mod error;
pub mod gemini;

pub use backstory::{
    backstory_or_fallback, generate_backstory_or_fallback, BackstoryRequest, FALLBACK_ERROR,
    FALLBACK_NO_API_KEY,
};
pub use client::{NarrativeClient, NarrativeConfig, PendingRequest, DEFAULT_MODEL};
pub use error::IntegrationError;
