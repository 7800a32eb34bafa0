mod audio_format;
mod search_result;
mod session_id;
mod storage_path;
mod voice_answer;

pub use audio_format::AudioFormat;
pub use search_result::{AnswerBox, OrganicResult, SearchResultSet};
pub use session_id::SessionId;
pub use storage_path::StoragePath;
pub use voice_answer::{FallbackReason, VoiceAnswer};
