pub mod checkpoint;
pub mod hook;
pub mod plan;
pub mod pre_compact;
pub mod tasks;

pub use hook::{detect_command, hook_command, validate_command};
pub use plan::{plan_command, PlanAction};
pub use pre_compact::pre_compact_command;
pub use tasks::tasks_command;
