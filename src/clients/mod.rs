pub mod classroom_client;
pub mod drive_client;
pub mod llm_client;

pub use classroom_client::{ClassroomApi, ClassroomClient};
pub use drive_client::{DriveClient, StorageApi};
pub use llm_client::{CompletionApi, LlmClient, MAX_OUTPUT_TOKENS};
