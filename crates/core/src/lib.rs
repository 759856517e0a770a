pub mod classify;
pub mod config;
pub mod model;
pub mod notify;
pub mod parser;
pub mod services;
pub mod storage;

pub use classify::DayViews;
pub use config::AppConfig;
pub use model::{Bucket, Task};
pub use notify::Notifier;
pub use parser::ValidationError;
pub use services::TaskStore;
pub use storage::TaskStorage;
