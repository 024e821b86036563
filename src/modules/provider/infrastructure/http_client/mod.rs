mod request_queue;
mod retry_policy;

pub use request_queue::SerialRequestQueue;
pub use retry_policy::{RetryPolicy, RetryUtil};
