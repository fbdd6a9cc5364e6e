//! Console Event Sink
//!
//! Renders pipeline events as the human-readable transcript on stdout.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::Stylize;

use crate::application::check::{BUILD_SYSTEM_ROLE, TARGET_ROLE};
use crate::domain::ports::{EventSink, PipelineEvent};
use crate::error::InstallStep;

use super::terminal::{detect_capabilities, Icon, TerminalCapabilities};

pub struct ConsoleEventSink {
    caps: TerminalCapabilities,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    /// Console sink on stdout, styled for the attached terminal
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout(), detect_capabilities())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, caps: TerminalCapabilities) -> Self {
        Self {
            caps,
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl EventSink for ConsoleEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let text = render_event(&event, self.caps);
        if text.is_empty() {
            return;
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }
}

fn step_label(step: InstallStep) -> &'static str {
    match step {
        InstallStep::Upload => "Uploading",
        InstallStep::PreRemoval => "Removing prior install",
        InstallStep::Install => "Installing",
        InstallStep::Verify => "Version check",
    }
}

/// Captured remote output, indented under the line that produced it
fn indented(output: &str) -> String {
    output
        .trim_end()
        .lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn with_output(head: String, output: &str) -> String {
    if output.trim().is_empty() {
        head
    } else {
        format!("{}\n{}", head, indented(output))
    }
}

fn emphasize(text: &str, caps: TerminalCapabilities) -> String {
    if caps.supports_color {
        text.to_string().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Transcript text for one event; empty when the event prints nothing
pub fn render_event(event: &PipelineEvent, caps: TerminalCapabilities) -> String {
    let bold = |s: &str| emphasize(s, caps);

    match event {
        PipelineEvent::HostReachable { role, host, output } => {
            let head = format!(
                "{} {} {} is reachable",
                Icon::Success.colored(caps),
                role,
                bold(host.as_str())
            );
            if *role == BUILD_SYSTEM_ROLE {
                with_output(head, output)
            } else {
                head
            }
        }
        PipelineEvent::BuildStarted { package, command } => format!(
            "{} Building {}: {}",
            Icon::Remote.colored(caps),
            bold(if package.is_empty() { "(unnamed)" } else { package.as_str() }),
            command
        ),
        PipelineEvent::BuildCompleted { artifact, .. } => format!(
            "{} Build complete: {}",
            Icon::Success.colored(caps),
            artifact
        ),
        PipelineEvent::VersionResolved {
            version,
            release,
            prefix,
        } => format!(
            "{} Package {} version {} release {}",
            Icon::Arrow.colored(caps),
            bold(prefix.as_str()),
            version,
            release
        ),
        PipelineEvent::InstallStarted { target_count } => format!(
            "About to install on {} target system{}",
            target_count,
            if *target_count == 1 { "" } else { "s" }
        ),
        PipelineEvent::StepStarted {
            target,
            host,
            step,
            detail,
        } => format!(
            "{} {} on {} ({}): {}",
            Icon::Arrow.colored(caps),
            step_label(*step),
            bold(target.as_str()),
            host,
            detail
        ),
        PipelineEvent::StepSucceeded { stdout, .. } => indented(stdout),
        PipelineEvent::StepTolerated {
            target,
            step,
            exit_code,
        } => format!(
            "{} {} on {} returned exit code = {}; continuing",
            Icon::Warning.colored(caps),
            step,
            target,
            exit_code
        ),
        PipelineEvent::StepFailed {
            target,
            step,
            exit_code,
            stderr,
        } => with_output(
            format!(
                "{} {} failed on {}: exit code = {}",
                Icon::Error.colored(caps),
                step,
                bold(target.as_str()),
                exit_code
            ),
            stderr,
        ),
        PipelineEvent::InstallCompleted { succeeded, failed } => {
            if *failed == 0 {
                format!(
                    "{} Installation complete on {} target{}",
                    Icon::Success.colored(caps),
                    succeeded,
                    if *succeeded == 1 { "" } else { "s" }
                )
            } else {
                format!(
                    "{} Installation finished: {} succeeded, {} failed",
                    Icon::Error.colored(caps),
                    succeeded,
                    failed
                )
            }
        }
        PipelineEvent::Published { output } => with_output(
            format!("{} Publish complete", Icon::Success.colored(caps)),
            output,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn transcript(events: Vec<PipelineEvent>) -> String {
        let buffer = SharedBuffer::default();
        let sink = ConsoleEventSink::with_writer(buffer.clone(), TerminalCapabilities::plain());
        for event in events {
            sink.on_event(event);
        }
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn rpm_install_transcript() {
        let text = transcript(vec![
            PipelineEvent::VersionResolved {
                version: "1.2".to_string(),
                release: 3,
                prefix: "foo".to_string(),
            },
            PipelineEvent::InstallStarted { target_count: 1 },
            PipelineEvent::StepStarted {
                target: "node1".to_string(),
                host: "10.0.0.3".to_string(),
                step: InstallStep::Upload,
                detail: "foo-1.2-3.x86_64.rpm -> /tmp/foo-1.2-3.x86_64.rpm".to_string(),
            },
            PipelineEvent::StepStarted {
                target: "node1".to_string(),
                host: "10.0.0.3".to_string(),
                step: InstallStep::PreRemoval,
                detail: "rpm -e foo || /bin/true".to_string(),
            },
            PipelineEvent::StepTolerated {
                target: "node1".to_string(),
                step: InstallStep::PreRemoval,
                exit_code: 1,
            },
            PipelineEvent::StepStarted {
                target: "node1".to_string(),
                host: "10.0.0.3".to_string(),
                step: InstallStep::Install,
                detail: "rpm -iUvh /tmp/foo-1.2-3.x86_64.rpm".to_string(),
            },
            PipelineEvent::StepSucceeded {
                target: "node1".to_string(),
                step: InstallStep::Install,
                stdout: "Preparing...\nfoo-1.2-3\n".to_string(),
            },
            PipelineEvent::InstallCompleted {
                succeeded: 1,
                failed: 0,
            },
        ]);

        insta::assert_snapshot!(text, @r"
        -> Package foo version 1.2 release 3
        About to install on 1 target system
        -> Uploading on node1 (10.0.0.3): foo-1.2-3.x86_64.rpm -> /tmp/foo-1.2-3.x86_64.rpm
        -> Removing prior install on node1 (10.0.0.3): rpm -e foo || /bin/true
        [WARN] pre-removal on node1 returned exit code = 1; continuing
        -> Installing on node1 (10.0.0.3): rpm -iUvh /tmp/foo-1.2-3.x86_64.rpm
            Preparing...
            foo-1.2-3
        [OK] Installation complete on 1 target
        ");
    }

    #[test]
    fn failure_prints_exit_code_and_stderr() {
        let text = transcript(vec![PipelineEvent::StepFailed {
            target: "t2".to_string(),
            step: InstallStep::Upload,
            exit_code: 1,
            stderr: "scp: lost connection\n".to_string(),
        }]);

        assert_eq!(
            text,
            "[FAIL] upload failed on t2: exit code = 1\n    scp: lost connection\n"
        );
    }

    #[test]
    fn empty_stdout_prints_nothing() {
        let text = transcript(vec![PipelineEvent::StepSucceeded {
            target: "t1".to_string(),
            step: InstallStep::Upload,
            stdout: String::new(),
        }]);

        assert!(text.is_empty());
    }

    #[test]
    fn build_host_listing_is_shown_but_target_hostname_is_not() {
        let text = transcript(vec![
            PipelineEvent::HostReachable {
                role: BUILD_SYSTEM_ROLE,
                host: "10.0.0.2".to_string(),
                output: "total 8\ndrwxr-xr-x 2 root root 4096 VERSION\n".to_string(),
            },
            PipelineEvent::HostReachable {
                role: TARGET_ROLE,
                host: "10.0.0.3".to_string(),
                output: "node1\n".to_string(),
            },
        ]);

        insta::assert_snapshot!(text, @r"
        [OK] build system 10.0.0.2 is reachable
            total 8
            drwxr-xr-x 2 root root 4096 VERSION
        [OK] install target 10.0.0.3 is reachable
        ");
    }

    #[test]
    fn partial_install_summary() {
        let text = render_event(
            &PipelineEvent::InstallCompleted {
                succeeded: 2,
                failed: 1,
            },
            TerminalCapabilities::plain(),
        );
        assert_eq!(text, "[FAIL] Installation finished: 2 succeeded, 1 failed");
    }
}
