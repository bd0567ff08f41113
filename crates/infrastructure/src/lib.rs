//! nicprobe infrastructure adapters
pub mod inventory;
