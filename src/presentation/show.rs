//! `-show` rendering of the deployment descriptor

use std::fmt::Write;

use crate::domain::entities::{DeployConfig, HostDescriptor, DEFAULT_SSH_KEY};

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}

fn write_host(out: &mut String, host: &HostDescriptor, indent: &str) {
    let key = if host.ssh.key.is_empty() {
        format!("~/{} (default)", DEFAULT_SSH_KEY)
    } else {
        host.ssh.key.clone()
    };
    let rpm = if host.is_rpm() {
        format!("true ({})", or_none(host.arch()))
    } else {
        "false".to_string()
    };

    let _ = writeln!(out, "{}Name: {}", indent, or_none(&host.name));
    let _ = writeln!(out, "{}Host: {}", indent, or_none(host.address()));
    let _ = writeln!(out, "{}SSH Key: {}", indent, key);
    let _ = writeln!(out, "{}User: {}", indent, host.ssh.login_user());
    let _ = writeln!(out, "{}Remote Dir: {}", indent, host.ssh.remote_dir());
    let _ = writeln!(out, "{}RPM: {}", indent, rpm);
    let _ = writeln!(
        out,
        "{}Artifact: {}",
        indent,
        host.artifact_path().unwrap_or("(none)")
    );
}

/// Human-readable view of `config`, with SSH defaults applied
pub fn render_config(config: &DeployConfig) -> String {
    let mut out = String::new();

    out.push_str("Build System:\n");
    write_host(&mut out, &config.build_system, "  ");

    let _ = writeln!(out, "Install Targets ({}):", config.install_targets.len());
    for target in &config.install_targets {
        let _ = writeln!(out, "  - {}", target.label());
        write_host(&mut out, target, "    ");
    }

    let _ = writeln!(out, "Package: {}", or_none(&config.package_name));
    let _ = writeln!(out, "Build CLI: {}", or_none(&config.build_cli));
    let _ = writeln!(out, "Publish CLI: {}", or_none(&config.publish_cli));
    let _ = writeln!(out, "Build SSH CLI: {}", config.build_system.ssh.ssh_cli());
    out
}
