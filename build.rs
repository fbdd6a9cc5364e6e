//! Build script for remote-builder
//! Captures build identity (branch, revision, timestamp) for `-ver`

use chrono::Local;
use std::process::Command;

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.split_whitespace().collect::<String>())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let revision = git(&["rev-parse", "--short", "HEAD"]);
    let branch = git(&["rev-parse", "--abbrev-ref", "HEAD"]);

    // Same shape as `date +%d%b%y-%I:%M%p`
    let build_time = Local::now().format("%d%b%y-%I:%M%p").to_string();

    println!("cargo:rustc-env=BUILDER_GIT_REVISION={}", revision);
    println!("cargo:rustc-env=BUILDER_GIT_BRANCH={}", branch);
    println!("cargo:rustc-env=BUILDER_BUILD_TIME={}", build_time);

    println!("cargo:rerun-if-changed=.git/HEAD");
}
