//! Tasks and their handlers
//!
//! Each task is a fixed recipe. Runnable tasks resolve to exactly one
//! [`Invocation`]; `check` is a sequence of other tasks run strictly one
//! after another.

use crate::error::ExecutionResult;
use crate::runner::{Context, EnvOverlay, Invocation, Spawner, Status};
use std::env::consts::EXE_SUFFIX;
use std::fmt;

/// Disables cgo for the compiler
pub const CGO_ENABLED: &str = "CGO_ENABLED";
/// Forces module-aware mode
pub const GO111MODULE: &str = "GO111MODULE";
/// Target operating system
pub const GOOS: &str = "GOOS";
/// Target architecture
pub const GOARCH: &str = "GOARCH";

/// A task selected from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Test,
    Help,
    Build,
    Run,
    Lint,
    Check,
    /// Cross-build, selected with `linux`
    CrossBuild,
    /// Anything else; reported as a usage error
    Unknown(String),
}

impl Task {
    /// Every recognized task, in help order
    pub fn known() -> [Task; 7] {
        [
            Task::Test,
            Task::Help,
            Task::Build,
            Task::Run,
            Task::Lint,
            Task::Check,
            Task::CrossBuild,
        ]
    }

    /// Exact, case-sensitive match of a command-line token
    pub fn from_token(token: &str) -> Task {
        match token {
            "test" => Task::Test,
            "help" => Task::Help,
            "build" => Task::Build,
            "run" => Task::Run,
            "lint" => Task::Lint,
            "check" => Task::Check,
            "linux" => Task::CrossBuild,
            other => Task::Unknown(other.to_string()),
        }
    }

    /// Name as typed on the command line
    pub fn name(&self) -> &str {
        match self {
            Task::Test => "test",
            Task::Help => "help",
            Task::Build => "build",
            Task::Run => "run",
            Task::Lint => "lint",
            Task::Check => "check",
            Task::CrossBuild => "linux",
            Task::Unknown(token) => token,
        }
    }

    /// One-line description for help output
    pub fn about(&self) -> &'static str {
        match self {
            Task::Test => "Run the test suite",
            Task::Help => "Display this help message",
            Task::Build => "Build the binary for the host platform into dist/",
            Task::Run => "Run the built binary with the project configs",
            Task::Lint => "Run the linter",
            Task::Check => "Run lint, then test",
            Task::CrossBuild => "Cross-build the binary (linux/amd64 by default)",
            Task::Unknown(_) => "",
        }
    }

    /// Tasks that this one runs in order, empty for single-step tasks
    pub fn steps(&self) -> &'static [Task] {
        const CHECK_STEPS: &[Task] = &[Task::Lint, Task::Test];
        match self {
            Task::Check => CHECK_STEPS,
            _ => &[],
        }
    }

    /// Whether the task launches processes, as opposed to printing help
    pub fn is_runnable(&self) -> bool {
        !matches!(self, Task::Help | Task::Unknown(_))
    }

    /// Status line printed before the handler spawns its process
    pub fn status_line(&self, ctx: &Context) -> Option<String> {
        match self {
            Task::Test => Some("Testing...".to_string()),
            Task::Build => Some("Building the binary...".to_string()),
            Task::CrossBuild => Some(format!(
                "Building the binary... {} {}",
                ctx.config.cross.os, ctx.config.cross.arch
            )),
            Task::Run => Some("Running the binary...".to_string()),
            Task::Lint => Some("Linter...".to_string()),
            Task::Help | Task::Check | Task::Unknown(_) => None,
        }
    }

    /// Invocation for single-step tasks, built fresh from the context
    pub fn invocation(&self, ctx: &Context) -> Option<Invocation> {
        match self {
            Task::Test => Some(test_invocation(ctx)),
            Task::Build => Some(build_invocation(ctx)),
            Task::CrossBuild => Some(cross_build_invocation(ctx)),
            Task::Run => Some(run_invocation(ctx)),
            Task::Lint => Some(lint_invocation(ctx)),
            Task::Help | Task::Check | Task::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Overlay shared by `build` and `linux`
pub fn build_overlay() -> EnvOverlay {
    EnvOverlay::new()
        .with(CGO_ENABLED, "0")
        .with(GO111MODULE, "on")
}

fn test_invocation(ctx: &Context) -> Invocation {
    let test = &ctx.config.test;
    let mut inv = Invocation::new(&ctx.config.toolchain.go)
        .current_dir(ctx.root.clone())
        .arg("test");
    if test.race {
        inv = inv.arg("-race");
    }
    inv.arg(format!("-timeout={}", test.timeout))
        .arg(format!("-count={}", test.count))
        .args(test.packages.iter().cloned())
}

fn build_invocation(ctx: &Context) -> Invocation {
    let build = &ctx.config.build;
    Invocation::new(&ctx.config.toolchain.go)
        .current_dir(Some(ctx.resolve(format!("cmd/{}", ctx.config.app))))
        .args(["build", "-o"])
        .arg(&build.output)
        .arg("-ldflags")
        .arg(&build.ldflags)
        .with_overlay(build_overlay())
}

fn cross_build_invocation(ctx: &Context) -> Invocation {
    let cross = &ctx.config.cross;
    build_invocation(ctx)
        .env(GOOS, &cross.os)
        .env(GOARCH, &cross.arch)
}

fn run_invocation(ctx: &Context) -> Invocation {
    let run = &ctx.config.run;
    let binary = ctx
        .resolve(&run.dist)
        .join(format!("{}{}", ctx.config.app, EXE_SUFFIX));

    Invocation::new(binary.to_string_lossy())
        .current_dir(ctx.root.clone())
        .args(["-config", run.config.as_str()])
}

fn lint_invocation(ctx: &Context) -> Invocation {
    Invocation::new(&ctx.config.toolchain.linter)
        .current_dir(ctx.root.clone())
        .arg("run")
}

/// Execute a task and return the status that should become the exit code
pub fn execute_task(
    task: &Task,
    ctx: &Context,
    spawner: &mut dyn Spawner,
) -> ExecutionResult<Status> {
    match task {
        Task::Check => run_sequence(task.steps(), ctx, spawner),
        Task::Help => Ok(Status::SUCCESS),
        Task::Unknown(_) => Ok(Status::USAGE),
        _ => {
            if let Some(line) = task.status_line(ctx) {
                ctx.print_status(&line);
            }
            match task.invocation(ctx) {
                Some(inv) => run_invocation_with(&inv, ctx, spawner),
                None => Ok(Status::SUCCESS),
            }
        }
    }
}

/// Run tasks one at a time, each finishing before the next starts.
///
/// Stops at the first non-zero status unless `check.keep_going` is set;
/// either way the first failure is what gets returned.
pub fn run_sequence(
    steps: &[Task],
    ctx: &Context,
    spawner: &mut dyn Spawner,
) -> ExecutionResult<Status> {
    let keep_going = ctx.config.check.keep_going;
    let mut first_failure = None;

    for step in steps {
        let status = execute_task(step, ctx, spawner)?;
        if status.success() {
            continue;
        }

        ctx.print_error(&format!(
            "'{}' failed with exit code {}",
            step,
            status.code()
        ));
        if !keep_going {
            return Ok(status);
        }
        first_failure.get_or_insert(status);
    }

    Ok(first_failure.unwrap_or(Status::SUCCESS))
}

/// Apply the invocation's overlay to the base environment and spawn it
pub fn run_invocation_with(
    inv: &Invocation,
    ctx: &Context,
    spawner: &mut dyn Spawner,
) -> ExecutionResult<Status> {
    if let Some(dir) = &inv.working_dir {
        ctx.print_debug(&format!("working directory: {}", dir.display()));
    }
    ctx.print_debug(&format!("exec: {}", inv));

    let env = ctx.base_env.apply(&inv.overlay);
    let status = spawner.spawn(inv, &env)?;

    ctx.print_debug(&format!("'{}' exited with {}", inv.program, status.code()));
    Ok(status)
}
