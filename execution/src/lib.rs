mod args;
mod executor;
mod process_executor;

pub use args::ExecutionArgs;
pub use executor::{ExecutionFailure, ExecutionResult, Executor};
pub use process_executor::ProcessExecutor;
