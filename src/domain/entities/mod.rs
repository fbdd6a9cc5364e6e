//! Domain Entities
//!
//! The persisted deployment descriptor and the hosts it names.

mod deploy_config;
mod host;

pub use deploy_config::DeployConfig;
pub use host::{
    base_name, HostDescriptor, SshEndpoint, DEFAULT_REMOTE_DIR, DEFAULT_SSH_KEY, DEFAULT_SSH_USER,
};
