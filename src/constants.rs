pub const MONGO_DATABASE: &str = "task_management";
pub const MONGO_TASK_COLLECTION: &str = "tasks";

pub const DEFAULT_SORT_FIELD: &str = "dueDate";
pub const DEFAULT_LIMIT_SIZE: i64 = 10;
pub const DEFAULT_SKIP_SIZE: u64 = 0;
