//! Python pipeline: publish, style check, test files, packaging round trip

use super::layout::PythonLayout;
use crate::artifact::read_version;
use crate::discovery::discover_test_files;
use crate::exceptions::{GauntletError, Result};
use crate::process::{CommandRunner, CommandSpec, run_cmd};
use crate::stages::{Stage, run_stages};
use crate::utils::delete_if_exists;
use log::{error, info};
use std::fmt;
use std::path::{Path, PathBuf};

/// State shared by the Python stages
pub struct PythonPipeline<'r> {
    root: PathBuf,
    home: Option<PathBuf>,
    layout: PythonLayout,
    runner: &'r dyn CommandRunner,
    /// Coordinate of the locally published package, set by `prepare`
    package: Option<String>,
}

impl fmt::Debug for PythonPipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PythonPipeline")
            .field("root", &self.root)
            .field("home", &self.home)
            .field("package", &self.package)
            .finish_non_exhaustive()
    }
}

impl<'r> PythonPipeline<'r> {
    pub fn new(
        root: PathBuf,
        home: Option<PathBuf>,
        layout: PythonLayout,
        runner: &'r dyn CommandRunner,
    ) -> Self {
        Self {
            root,
            home,
            layout,
            runner,
            package: None,
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.layout.path(&self.root, relative)
    }

    /// Command rooted at the repository
    fn command(&self, program: &str) -> CommandSpec {
        CommandSpec::new(program).current_dir(&self.root)
    }

    fn script(&self, relative: &str) -> CommandSpec {
        CommandSpec::from_path(&self.path(relative)).current_dir(&self.root)
    }

    fn run(&self, spec: &CommandSpec) -> Result<()> {
        run_cmd(self.runner, spec).map(|_| ())
    }

    fn clear_caches(&self) -> Result<()> {
        info!("### Clearing artifacts from local caches");
        for cache in self.layout.cache_paths(self.home.as_deref())? {
            delete_if_exists(&cache)?;
        }
        Ok(())
    }

    /// Clear caches, publish the package locally and record its coordinate
    pub fn prepare(&mut self) -> Result<()> {
        self.clear_caches()?;
        self.run(&self.script(&self.layout.build_tool).args(["clean", "publishM2"]))?;

        let version = read_version(&self.path(&self.layout.version_file))?;
        let package = version.coordinate(&self.layout.package_prefix);
        info!("📦 Published package {package}");
        self.package = Some(package);
        Ok(())
    }

    pub fn run_style_checks(&mut self) -> Result<()> {
        self.run(&self.script(&self.layout.lint_script))
    }

    /// Submit every discovered test file against the published package
    pub fn run_test_files(&mut self) -> Result<()> {
        let package = self.package.clone().ok_or_else(|| {
            GauntletError::Config("package coordinate is not prepared".to_string())
        })?;
        let test_dir = self.path(&self.layout.test_dir);
        let extra_class_path = self.path(&self.layout.extra_class_path);

        let test_files = discover_test_files(
            &test_dir,
            &self.layout.test_suffix,
            &self.layout.excluded_prefix,
        )?;
        info!("🔎 Found {} test files in {}", test_files.len(), test_dir.display());

        for test_file in &test_files {
            let spec = self
                .command(&self.layout.submit_command)
                .arg(format!("--driver-class-path={}", extra_class_path.display()))
                .arg("--packages")
                .arg(package.as_str())
                .path_arg(test_file)
                .print_cmd(false);

            info!("Running tests in {}\n=============", test_file.display());
            info!("Command: {}", spec.display());
            if let Err(e) = self.run(&spec) {
                error!("Failed tests in {}", test_file.display());
                return Err(e);
            }
        }
        Ok(())
    }

    /// Build, install and smoke-test the Python distribution
    pub fn run_packaging_tests(&mut self) -> Result<()> {
        let version = read_version(&self.path(&self.layout.version_file))?;
        let pip = self.layout.pip.as_str();
        let python = self.layout.python.as_str();

        self.run(
            &self
                .command(pip)
                .args(["uninstall", "--yes"])
                .args(self.layout.uninstall_packages.iter().cloned()),
        )?;

        self.clear_caches()?;

        self.run(
            &self
                .command(pip)
                .arg("install")
                .args(self.layout.helper_packages.iter().cloned())
                .arg("--upgrade"),
        )?;

        let dist_dir = self.path(&self.layout.dist_dir);
        info!("### Deleting `{}` directory if it exists", dist_dir.display());
        delete_if_exists(&dist_dir)?;

        self.run(
            &self
                .command(python)
                .args(["setup.py", "bdist_wheel"])
                .discard_stderr(),
        )?;
        self.run(&self.command(python).args(["setup.py", "sdist"]))?;

        let wheel = dist_dir.join(version.wheel_file_name(&self.layout.wheel_distribution));
        self.run(&self.command(pip).arg("install").path_arg(&wheel))?;

        // The smoke test runs on the plain interpreter, not the submit command
        let smoke_test = self.path(&self.layout.smoke_test);
        info!("### Starting tests...");
        if let Err(e) = self.run(&self.command(python).path_arg(&smoke_test)) {
            error!("Failed pip installation tests in {}", smoke_test.display());
            return Err(e);
        }
        Ok(())
    }
}

/// The Python stages in execution order
pub fn python_stages<'r>() -> Vec<Stage<'r, PythonPipeline<'r>>> {
    vec![
        Stage::new("prepare", PythonPipeline::prepare),
        Stage::new("style-checks", PythonPipeline::run_style_checks),
        Stage::new("python-tests", PythonPipeline::run_test_files),
        Stage::new("packaging-tests", PythonPipeline::run_packaging_tests),
    ]
}

/// Run the whole Python pipeline from a repository root
///
/// A relative root is resolved against the working directory first, since
/// it is used both as the child's working directory and in program paths.
pub fn run_python_pipeline(
    root: &Path,
    home: Option<PathBuf>,
    layout: PythonLayout,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let root = std::path::absolute(root)?;
    let mut pipeline = PythonPipeline::new(root, home, layout, runner);
    run_stages(python_stages(), &mut pipeline)
}
