pub mod analysis;
pub mod chat;
pub mod error;
pub mod terms;

pub use analysis::{AnalysisResult, AnalysisStats, LegalAnalysis, UploadResponse};
pub use chat::{
    dedupe_sources, ChatMessage, ChatReply, ChatRequest, ChatResponse, MessageStyle, Sender,
};
pub use error::ApiError;
pub use terms::{count_terms, parse_annotations, Segment};
