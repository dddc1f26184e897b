pub mod completion;
pub mod search;
pub mod show;
