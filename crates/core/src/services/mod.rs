pub mod tasks;

pub use tasks::TaskStore;
