pub mod audio;
pub mod observability;
pub mod search;
pub mod speech;
pub mod storage;
