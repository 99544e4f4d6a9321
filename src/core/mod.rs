pub mod driver;
pub mod error;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::TrialCore;
pub use error::TrialError;
pub use event::TrialEvent;
pub use state::{Block, BlockId, MemoryPool, Task, TaskId, TaskState, Ticks, TrialCtx, Units};
