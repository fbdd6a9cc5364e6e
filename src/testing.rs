//! Test doubles for the domain ports

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::domain::entities::{DeployConfig, HostDescriptor, SshEndpoint};
use crate::domain::ports::{EventSink, ExecOutput, PipelineEvent, RemoteError, RemoteExecutor};

/// One call made against the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Execute {
        host: String,
        command: String,
    },
    Copy {
        from_host: String,
        from_path: String,
        to_host: String,
        to_path: String,
    },
    Read {
        host: String,
        path: String,
    },
}

impl Call {
    pub fn host(&self) -> &str {
        match self {
            Call::Execute { host, .. } | Call::Read { host, .. } => host,
            Call::Copy { to_host, .. } => to_host,
        }
    }
}

/// In-memory executor answering from a script and recording every call
#[derive(Default)]
pub struct ScriptedExecutor {
    calls: RefCell<Vec<Call>>,
    responses: Vec<(String, String, ExecOutput)>,
    unreachable: HashSet<String>,
    failing_copies: HashSet<String>,
    files: HashMap<(String, String), String>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands on `host` containing `needle` answer with `output`
    pub fn on_execute(mut self, host: &str, needle: &str, output: ExecOutput) -> Self {
        self.responses
            .push((host.to_string(), needle.to_string(), output));
        self
    }

    /// Every command on `host` fails the way ssh does when it cannot connect
    pub fn unreachable(mut self, host: &str) -> Self {
        self.unreachable.insert(host.to_string());
        self
    }

    /// Copies landing on `host` fail
    pub fn fail_copy_to(mut self, host: &str) -> Self {
        self.failing_copies.insert(host.to_string());
        self
    }

    pub fn with_file(mut self, host: &str, path: &str, content: &str) -> Self {
        self.files
            .insert((host.to_string(), path.to_string()), content.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Commands executed on `host`, in order
    pub fn commands_on(&self, host: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Execute { host: h, command } if h == host => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    /// Hosts touched, in order, without consecutive repeats
    pub fn hosts_contacted(&self) -> Vec<String> {
        let mut hosts: Vec<String> = Vec::new();
        for call in self.calls.borrow().iter() {
            if hosts.last().map(String::as_str) != Some(call.host()) {
                hosts.push(call.host().to_string());
            }
        }
        hosts
    }
}

impl RemoteExecutor for ScriptedExecutor {
    fn execute(&self, host: &SshEndpoint, command: &str) -> Result<ExecOutput, RemoteError> {
        self.calls.borrow_mut().push(Call::Execute {
            host: host.host.clone(),
            command: command.to_string(),
        });

        if self.unreachable.contains(&host.host) {
            return Ok(ExecOutput::failed(
                255,
                format!("ssh: connect to host {} port 22: Connection refused", host.host),
            ));
        }

        let output = self
            .responses
            .iter()
            .find(|(h, needle, _)| h == &host.host && command.contains(needle.as_str()))
            .map(|(_, _, output)| output.clone())
            .unwrap_or_default();
        Ok(output)
    }

    fn copy_between(
        &self,
        source: &SshEndpoint,
        source_path: &str,
        dest: &SshEndpoint,
        dest_path: &str,
    ) -> Result<(), RemoteError> {
        self.calls.borrow_mut().push(Call::Copy {
            from_host: source.host.clone(),
            from_path: source_path.to_string(),
            to_host: dest.host.clone(),
            to_path: dest_path.to_string(),
        });

        if self.failing_copies.contains(&dest.host) || self.unreachable.contains(&dest.host) {
            return Err(RemoteError::TransferFailed {
                from: format!("{}:{}", source.destination(), source_path),
                to: format!("{}:{}", dest.destination(), dest_path),
                exit_code: 1,
                stderr: "scp: lost connection".to_string(),
            });
        }
        Ok(())
    }

    fn read_file(&self, host: &SshEndpoint, path: &str) -> Result<String, RemoteError> {
        self.calls.borrow_mut().push(Call::Read {
            host: host.host.clone(),
            path: path.to_string(),
        });

        self.files
            .get(&(host.host.clone(), path.to_string()))
            .cloned()
            .ok_or_else(|| RemoteError::CommandFailed {
                destination: host.destination(),
                command: format!("cat {}", path),
                exit_code: 1,
                stderr: format!("cat: {}: No such file or directory", path),
            })
    }
}

/// Event sink that keeps everything it receives
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn on_event(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Binary-mode config: build host `build`, targets `t1..tN`
pub fn binary_config(targets: usize) -> DeployConfig {
    let build = HostDescriptor::new(
        "build",
        SshEndpoint::new("build").with_remote_dir("/srv/build"),
    );
    (1..=targets).fold(
        DeployConfig::new(build).with_package_name("testharness"),
        |config, i| {
            let host = format!("t{}", i);
            config.with_target(HostDescriptor::new(
                host.clone(),
                SshEndpoint::new(host).with_remote_dir("/usr/local/bin"),
            ))
        },
    )
}

/// RPM-mode config: build host `build`, targets `t1..tN`
pub fn rpm_config(targets: usize) -> DeployConfig {
    let build = HostDescriptor::new(
        "build",
        SshEndpoint::new("build").with_remote_dir("/root/foo"),
    )
    .with_rpm("x86_64");
    (1..=targets).fold(
        DeployConfig::new(build)
            .with_package_name("foo")
            .with_build_cli("make clean rpms"),
        |config, i| {
            let host = format!("t{}", i);
            config.with_target(
                HostDescriptor::new(
                    host.clone(),
                    SshEndpoint::new(host).with_remote_dir("/tmp"),
                )
                .with_rpm("x86_64"),
            )
        },
    )
}
