use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

mod commands;
mod config;
mod error;
mod io;

use commands::resolve::FunctionTarget;

#[derive(Parser, Debug)]
#[command(name = "eventide")]
#[command(about = "Inspect Eventide project files", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List the dependencies to export with a build
    Deps {
        /// Export kind (npm, cordova, ...); defaults to the configuration, then npm
        #[arg(short, long)]
        kind: Option<String>,
        /// Extension used by the game; repeat for several. Defaults to every extension
        #[arg(short, long = "used", value_name = "EXTENSION")]
        used: Vec<String>,
        /// Project file; defaults to the configuration
        #[arg(value_name = "PROJECT")]
        project: Option<PathBuf>,
    },

    /// Tell which declaration a name refers to inside a function
    Resolve {
        /// Extension declaring the function
        #[arg(short, long)]
        extension: String,
        /// Behavior declaring the function
        #[arg(short, long, conflicts_with = "object")]
        behavior: Option<String>,
        /// Custom object declaring the function
        #[arg(short, long)]
        object: Option<String>,
        /// Function to resolve in
        #[arg(short, long)]
        function: String,
        /// Name to resolve
        #[arg(value_name = "NAME")]
        name: String,
        /// Project file; defaults to the configuration
        #[arg(value_name = "PROJECT")]
        project: Option<PathBuf>,
    },

    /// Load a project and check it saves back unchanged
    Check {
        /// Project file; defaults to the configuration
        #[arg(value_name = "PROJECT")]
        project: Option<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let loaded = config::load_config(&io::current_dir()?)?;
    let config = loaded.as_ref();

    match args.command {
        Command::Deps { kind, used, project } => commands::deps::handle_deps(project, kind, used, config)?,
        Command::Resolve {
            extension,
            behavior,
            object,
            function,
            name,
            project,
        } => {
            let target = FunctionTarget {
                extension,
                behavior,
                object,
                function,
            };
            commands::resolve::handle_resolve(project, target, name, config)?
        }
        Command::Check { project } => commands::check::handle_check(project, config)?,
    }
    Ok(())
}
