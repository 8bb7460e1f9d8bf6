#![allow(unused_imports)]

pub use execagent_test_utils::builders;
pub use execagent_test_utils::fake_executor;
pub use execagent_test_utils::{init_tracing, poll_until_terminal, with_timeout};
