pub mod user_ctx;
pub mod user_flow;

pub use user_ctx::UserCtx;
pub use user_flow::{UserFlow, UserOutcome};
