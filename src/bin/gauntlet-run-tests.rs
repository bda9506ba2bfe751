//! Top-level test runner: build tool tests, then the Python pipeline

use clap::Parser;
use gauntlet::exit_codes::{
    EXIT_INVALID_ARGS, EXIT_IO_ERROR, EXIT_PANIC, EXIT_SUCCESS, exit_code_for,
};
use gauntlet::{RunTestsConfig, default_python_runner, run_all_tests};
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = gauntlet::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Run the build tool tests and the Python pipeline")]
struct Args {
    /// Repository root (defaults to CWD)
    #[arg(long, env = "GAUNTLET_ROOT_DIR")]
    root_dir: Option<PathBuf>,

    /// Take the containerized path (build tool tests only)
    #[arg(long, env = "USE_DOCKER", num_args = 0..=1, default_missing_value = "true")]
    use_docker: Option<String>,

    /// Cross-build variant; Python tests run only for 2.12.x or when unset
    #[arg(long, env = "SCALA_VERSION")]
    scala_version: Option<String>,

    /// Python pipeline executable (defaults to the one next to this binary)
    #[arg(long, env = "GAUNTLET_PYTHON_RUNNER")]
    python_runner: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, json[:level])
    #[arg(long, env = "GAUNTLET_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() {
    // Set up panic handler to return specific exit code
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in test runner");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    // Handle --version before clap
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("gauntlet-run-tests {}", gauntlet::version::full_version());
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

    let root_dir = match args.root_dir {
        Some(dir) => dir,
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Cannot determine working directory: {e}");
                return EXIT_IO_ERROR;
            }
        },
    };

    let config = match RunTestsConfig::from_env_values(
        root_dir,
        args.use_docker.as_deref(),
        args.scala_version.as_deref(),
        args.python_runner.unwrap_or_else(default_python_runner),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Cannot resolve root directory: {e}");
            return EXIT_IO_ERROR;
        }
    };

    log::debug!("🧭 Configuration: {:?}", config);

    match run_all_tests(&config) {
        Ok(()) => {
            log::info!("✅ All stages passed");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {e}");
            exit_code_for(&e)
        }
    }
}
