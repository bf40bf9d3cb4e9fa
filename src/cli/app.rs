//! Main CLI application

use crate::config::{load_config_from, Config};
use crate::error::MkgoError;
use crate::runner::{execute_task, BaseEnv, Context, ProcessSpawner, Spawner, Status, Task};
use clap::Command;
use std::env;

/// CLI application
pub struct App<S: Spawner = ProcessSpawner> {
    /// Read-only execution context
    ctx: Context,
    /// Process launcher
    spawner: S,
}

impl App<ProcessSpawner> {
    /// Create an app for the current directory and process environment
    pub fn new() -> Result<Self, MkgoError> {
        let cwd = env::current_dir()?;
        let loaded = load_config_from(&cwd)?;
        let root = loaded.root();

        let ctx = Context::new(BaseEnv::capture(), loaded.config).with_root(root);
        if let Some(path) = &loaded.path {
            ctx.print_debug(&format!("using {}", path.display()));
        }

        Ok(App {
            ctx,
            spawner: ProcessSpawner,
        })
    }

    /// Create an app on built-in defaults without touching any project file.
    ///
    /// Used for `help` and unknown tasks, which must answer even when the
    /// project file is broken.
    pub fn without_project() -> Self {
        App {
            ctx: Context::new(BaseEnv::capture(), Config::default()),
            spawner: ProcessSpawner,
        }
    }
}

impl<S: Spawner> App<S> {
    /// Create an app with an explicit context and spawner
    pub fn with_spawner(ctx: Context, spawner: S) -> Self {
        App { ctx, spawner }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Dispatch on the first argument (program name already stripped).
    ///
    /// No argument prints help and yields 0; an unrecognized one prints help
    /// and yields 1. Otherwise the status is whatever the handler's last
    /// child process exited with.
    pub fn dispatch(&mut self, args: &[String]) -> Result<i32, MkgoError> {
        let task = select_task(args);

        if args.len() > 1 {
            self.ctx
                .print_debug(&format!("ignoring extra arguments: {}", args[1..].join(" ")));
        }

        match &task {
            Task::Help => {
                print_help();
                Ok(Status::SUCCESS.code())
            }
            Task::Unknown(token) => {
                self.ctx.print_error(&format!("unknown task '{}'", token));
                print_help();
                Ok(Status::USAGE.code())
            }
            _ => {
                let status = execute_task(&task, &self.ctx, &mut self.spawner)?;
                Ok(status.code())
            }
        }
    }
}

/// Task named by the first argument, `help` when there is none
pub fn select_task(args: &[String]) -> Task {
    match args.first() {
        Some(token) => Task::from_token(token),
        None => Task::Help,
    }
}

/// Build the clap command used to render help
fn build_command() -> Command {
    let mut cmd = Command::new("mkgo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build, test and lint a Go application")
        .override_usage("mkgo <TASK>")
        .subcommand_help_heading("Tasks")
        .subcommand_value_name("TASK")
        .disable_help_subcommand(true);

    for task in Task::known() {
        cmd = cmd.subcommand(Command::new(task.name().to_string()).about(task.about()));
    }

    cmd
}

/// Help text listing every task
pub fn help_text() -> String {
    build_command().render_help().to_string()
}

fn print_help() {
    println!("{}", help_text());
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<i32, MkgoError> {
    let args: Vec<String> = env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    if select_task(&args).is_runnable() {
        App::new()?.dispatch(&args)
    } else {
        App::without_project().dispatch(&args)
    }
}
