//! Publish use case: run `publishCLI` on the build host

use tracing::{debug, info};

use crate::domain::entities::DeployConfig;
use crate::domain::ports::{EventSink, ExecOutput, PipelineEvent, RemoteExecutor};
use crate::domain::services::shell;
use crate::error::{BuilderError, BuilderResult};

pub struct PublishUseCase<'a, E: RemoteExecutor> {
    executor: E,
    events: &'a dyn EventSink,
}

impl<'a, E: RemoteExecutor> PublishUseCase<'a, E> {
    pub fn new(executor: E, events: &'a dyn EventSink) -> Self {
        Self { executor, events }
    }

    pub fn execute(&self, config: &DeployConfig) -> BuilderResult<ExecOutput> {
        let publish_cli = config.publish_cli.trim();
        if publish_cli.is_empty() {
            return Err(BuilderError::Configuration(
                "missing publish cli: set publishCLI".to_string(),
            ));
        }

        let build_host = &config.build_system;
        let command = shell::in_dir(&build_host.ssh.remote_dir(), publish_cli);
        info!(host = %build_host.address(), "publishing");
        debug!("{} {:?}", build_host.ssh.ssh_cli(), command);

        let output = self.executor.execute(&build_host.ssh, &command)?;
        if !output.success() {
            return Err(BuilderError::PublishFailed {
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }
        self.events.on_event(PipelineEvent::Published {
            output: output.stdout.clone(),
        });
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::NoopEventSink;
    use crate::testing::{rpm_config, ScriptedExecutor};

    #[test]
    fn runs_publish_cli_in_build_dir() {
        let executor = ScriptedExecutor::new();
        let config = rpm_config(0).with_publish_cli("make publish");

        PublishUseCase::new(&executor, &NoopEventSink)
            .execute(&config)
            .unwrap();

        assert_eq!(
            executor.commands_on("build"),
            vec!["cd /root/foo/ && make publish"]
        );
    }

    #[test]
    fn empty_publish_cli_is_a_configuration_error() {
        let executor = ScriptedExecutor::new();

        let err = PublishUseCase::new(&executor, &NoopEventSink)
            .execute(&rpm_config(0))
            .unwrap_err();

        assert!(matches!(err, BuilderError::Configuration(_)));
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn failing_publish_is_fatal() {
        let executor = ScriptedExecutor::new().on_execute(
            "build",
            "publish",
            ExecOutput::failed(3, "AccessDenied"),
        );
        let config = rpm_config(0).with_publish_cli("make publish");

        let err = PublishUseCase::new(&executor, &NoopEventSink)
            .execute(&config)
            .unwrap_err();

        assert!(matches!(err, BuilderError::PublishFailed { exit_code: 3, .. }));
    }
}
