use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use acl_config::{AclConfig, BuildConfig};
use acl_diagnostics::Diagnostics;
use acl_error::{ext::AclErrorExt, AclError, ErrorLevel};
use anyhow::{anyhow, Result};
use clap::Args;
use log::{debug, info};

use crate::cli::CommandTrait;

#[derive(Debug, Args)]
pub struct Build {
    /// Use DOAS instead of SUDO when installing the binary
    #[arg(long)]
    pub use_doas: bool,
    /// Install the compiled binary into the system binary directory
    #[arg(long)]
    pub bin: bool,
    /// Continue through failed steps instead of stopping at the first
    #[arg(long)]
    pub keep_going: bool,
    /// Override the build directory
    #[arg(long)]
    pub build_dir: Option<PathBuf>,
}

impl CommandTrait for Build {
    type In = ();
    type Out = ();

    fn execute(&mut self, _: ()) -> Result<()> {
        let config = AclConfig::load(Path::new(".")).map_err(|e| anyhow!("{}", e))?;
        let root = std::env::current_dir()?;
        run_build(self, &config.build, &root)
    }
}

/// A single external invocation of the build tool chain, run with the build
/// directory as the child's working directory.
#[derive(Debug, Clone)]
pub struct Step {
    pub name: &'static str,
    pub program: String,
    pub args: Vec<String>,
    pub success: String,
}

pub fn plan_steps(args: &Build, config: &BuildConfig) -> Vec<Step> {
    let mut steps = vec![
        Step {
            name: "configure",
            program: config.generator.clone(),
            args: vec!["..".into()],
            success: format!("{} has been executed successfully", config.generator),
        },
        Step {
            name: "compile",
            program: config.driver.clone(),
            args: Vec::new(),
            success: format!("{} has been executed successfully", config.driver),
        },
    ];

    if args.bin {
        let elevate = if args.use_doas {
            &config.elevate_alt
        } else {
            &config.elevate
        };
        steps.push(Step {
            name: "install",
            program: elevate.clone(),
            args: vec![
                "cp".into(),
                "-rf".into(),
                config.artifact.clone(),
                config.install_to.clone(),
            ],
            success: "Binary has been copied successfully".into(),
        });
    }

    steps
}

pub fn run_build(args: &Build, config: &BuildConfig, root: &Path) -> Result<()> {
    info!("Compiling the source code...");

    let build_dir = root.join(args.build_dir.as_ref().unwrap_or(&config.build_dir));
    if !build_dir.exists() {
        fs::create_dir(&build_dir)?;
        info!("Created build directory");
    } else {
        debug!("Reusing build directory {:?}", build_dir);
    }

    let diag = Diagnostics::new();

    let mut failed = 0usize;
    for step in plan_steps(args, config) {
        match run_step(&step, &build_dir) {
            Ok(()) => info!("{}", step.success),
            Err(e) => {
                failed += 1;
                diag.push_error(e);
                if !args.keep_going {
                    break;
                }
            }
        }
    }

    if failed > 0 {
        _ = diag.finish_stage();
        return Err(anyhow!(
            "{} build step{} failed",
            failed,
            if failed > 1 { "s" } else { "" }
        ));
    }

    info!("Compilation complete");
    Ok(())
}

fn run_step(step: &Step, build_dir: &Path) -> Result<(), AclError> {
    debug!("Running {} {:?}", step.program, step.args);

    let status = Command::new(&step.program)
        .args(&step.args)
        .current_dir(build_dir)
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(AclError::new(
            ErrorLevel::Error,
            format!("{} step failed with {}", step.name, status),
        )
        .with_path(|_| build_dir.to_path_buf())),
        Err(e) => Err(AclError::new(
            ErrorLevel::Error,
            format!("{} step could not spawn {}", step.name, step.program),
        )
        .with_path(|_| build_dir.to_path_buf())
        .with_note(|_| e.to_string())),
    }
}
