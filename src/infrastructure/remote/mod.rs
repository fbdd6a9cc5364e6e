//! Remote execution over SSH

mod ssh;

pub use ssh::SshExecutor;
