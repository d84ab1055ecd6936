// Re-export all model types from submodules.

pub use app::{CursorState, Focus};
pub use application::{AdminState, Application, OperationalState, SealData};
pub use pool::{Pool, PoolKind, PoolStatus};

mod app;
mod application;
mod pool;
