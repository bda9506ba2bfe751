//! Python pipeline runner

use clap::Parser;
use gauntlet::exit_codes::{
    EXIT_INVALID_ARGS, EXIT_IO_ERROR, EXIT_PANIC, EXIT_SUCCESS, exit_code_for,
};
use gauntlet::{PythonTestOptions, run_python_tests};
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = gauntlet::version::VERSION;

#[derive(Parser, Debug)]
#[command(
    version = VERSION,
    about = "Publish, style-check, test and package the Python distribution"
)]
struct Args {
    /// Repository root (defaults to CWD)
    #[arg(long, env = "GAUNTLET_ROOT_DIR")]
    root_dir: Option<PathBuf>,

    /// JSON file overriding the repository layout
    #[arg(long, env = "GAUNTLET_LAYOUT")]
    layout: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, json[:level])
    #[arg(long, env = "GAUNTLET_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() {
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    match panic::catch_unwind(run) {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in Python test runner");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("gauntlet-python-tests {}", gauntlet::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                EXIT_INVALID_ARGS
            } else {
                EXIT_SUCCESS
            };
        }
    };
    gauntlet::logger::JsonLogger::init_with_level(&args.log_level, "--log-level");

    let root_dir = match args
        .root_dir
        .map_or_else(env::current_dir, std::path::absolute)
    {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Cannot resolve root directory: {e}");
            return EXIT_IO_ERROR;
        }
    };

    let options = PythonTestOptions {
        layout_path: args.layout,
        home: gauntlet::utils::home_dir(),
    };

    match run_python_tests(&root_dir, options) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            exit_code_for(&e)
        }
    }
}
