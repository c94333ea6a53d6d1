mod completion_worker;
mod prompt_template;
mod relay_messages;
mod relay_service;
mod retention_sweeper;
mod stream_proxy_service;

pub use completion_worker::{CompletionError, CompletionRequest, CompletionWorker, Completer};
pub use prompt_template::{DEFAULT_INSTRUCTION, PromptTemplate};
pub use relay_messages::RelayMessages;
pub use relay_service::{RelayError, RelayReply, RelayService};
pub use retention_sweeper::RetentionSweeper;
pub use stream_proxy_service::StreamProxyService;
