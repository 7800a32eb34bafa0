mod error;
mod health;
mod serve_audio;
mod upload;

pub use error::{ErrorResponse, error_response};
pub use health::health_handler;
pub use serve_audio::serve_audio_handler;
pub use upload::{Base64Upload, UploadResponse, upload_handler};
