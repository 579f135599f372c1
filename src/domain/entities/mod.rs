mod chat;
mod search;
mod upload;

pub use chat::{select_reply, ChatMessage, ChatReply};
pub use search::{SearchHit, SearchRequest, SEARCH_SCORE_FIELD};
pub use upload::UploadedFile;
