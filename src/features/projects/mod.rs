//! Projects and their tasks.
//!
//! Time is logged against a project and, optionally, one of its tasks. Tasks
//! are kept in a per-project order that can be rearranged.

mod storage;
mod types;

pub use storage::{ProjectStorage, TaskStorage};
pub use types::{
    Priority, Project, ProjectChanges, Task, TaskChanges, TaskProgress, TaskStatus,
    DEFAULT_PROJECT_COLOR,
};
