/*
[INPUT]:  Task specs and a shared session
[OUTPUT]: Parallel and sequential execution of RPC operations
[POS]:    Dispatch layer - concurrency on top of the HTTP layer
[UPDATE]: When adding execution strategies
*/

pub mod dispatcher;
pub mod plan;
pub mod runner;
pub mod trading_loop;

pub use dispatcher::{DetachedTask, DispatchReport, Dispatcher};
pub use plan::{JoinPolicy, Operation, OperationOutput, TaskOutcome, TaskSpec};
pub use runner::OperationRunner;
pub use trading_loop::{TradingLoopReport, run_trading_loop};
