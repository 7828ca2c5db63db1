pub mod client;
pub mod credentials;
pub mod gemini;
pub mod http_client;
pub mod normalizer;
pub mod prompts;
pub mod types;

pub use client::*;
pub use credentials::*;
pub use gemini::GeminiClient;
pub use normalizer::{normalize, Normalized};
pub use types::*;
