mod dashscope_client;
mod mock_llm_client;
mod sse_proxy_client;

pub use dashscope_client::{DEFAULT_BASE_URL, DashScopeClient};
pub use mock_llm_client::MockLlmClient;
pub use sse_proxy_client::SseProxyClient;
