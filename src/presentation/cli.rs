//! Command-line surface
//!
//! Flags are written Go-style with a single dash (`-build`); they are
//! rewritten to `--build` before clap sees them, so both spellings work.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::application::{InstallOptions, RunPlan};

/// Builder - build on a remote host, install on remote targets
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "builder", long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Run the build command on the build system
    #[arg(long)]
    pub build: bool,

    /// Install the artifact on every install target (builds first unless -skipbuild)
    #[arg(long)]
    pub install: bool,

    /// Run the publish command on the build system
    #[arg(long, visible_alias = "pub")]
    pub publish: bool,

    /// Install the artifact from the previous build without rebuilding
    #[arg(long = "skipbuild")]
    pub skip_build: bool,

    /// Print the configuration after all other operations
    #[arg(long)]
    pub show: bool,

    /// Probe every host for reachability before doing anything else
    #[arg(long)]
    pub check: bool,

    /// Log phase transitions
    #[arg(long)]
    pub verbose: bool,

    /// Log every remote command
    #[arg(long)]
    pub debug: bool,

    /// Print the full error chain on failure
    #[arg(long)]
    pub panic: bool,

    /// Enable experimental behavior
    #[arg(long, visible_alias = "exp")]
    pub experimental: bool,

    /// Print the version and exit
    #[arg(long = "ver", visible_alias = "version")]
    pub version: bool,

    /// Config file (default ./build.json, or $BUILDER_CONFIG)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit NDJSON events instead of the console transcript
    #[arg(long)]
    pub json: bool,

    /// Attempt every install target even after one fails
    #[arg(long = "keepgoing")]
    pub keep_going: bool,
}

impl Cli {
    /// Parse process arguments, accepting single-dash long flags
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_single_dash_flags(std::env::args_os()))
    }

    /// Phases selected by these flags
    pub fn run_plan(&self) -> RunPlan {
        RunPlan {
            self_check: self.check,
            build: self.build,
            install: self.install,
            skip_build: self.skip_build,
            publish: self.publish,
            install_options: InstallOptions {
                continue_on_error: self.keep_going,
            },
        }
    }
}

/// Rewrite `-flag` and `-flag=value` to their `--` form.
///
/// The program name, short flags (`-h`), values and anything after a bare
/// `--` are passed through untouched.
pub fn normalize_single_dash_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let is_long_single_dash = text.starts_with('-')
            && !text.starts_with("--")
            && text[1..].split('=').next().is_some_and(|name| name.len() > 1);
        if is_long_single_dash {
            out.push(OsString::from(format!("-{}", text)));
        } else {
            out.push(arg);
        }
    }
    out
}
