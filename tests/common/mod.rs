// Shared helpers for integration tests.
//
// Provides a temporary directory laid out as a home directory, an apps
// directory holding descriptor files and a main configuration file, plus a
// fluent builder so each test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotfiles_status::apps::ApplicationDatabase;
use dotfiles_status::classify::{self, StatusClassifier};
use dotfiles_status::config::Configuration;
use dotfiles_status::environment::Environment;
use dotfiles_status::exec::SystemExecutor;
use dotfiles_status::scan::{AppReport, AppSelection, scan_applications};

/// An isolated test environment backed by a [`tempfile::TempDir`].
///
/// Layout:
/// - `home/`            the fake home directory
/// - `apps/`            application descriptors
/// - `dotstatus.cfg`    main configuration (`APPS_DIR = apps`)
pub struct IntegrationTestContext {
    /// Temporary directory holding everything.
    pub root: tempfile::TempDir,
    xdg_config_home: Option<PathBuf>,
}

impl IntegrationTestContext {
    /// Create a new context using the base method.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        std::fs::create_dir_all(root.path().join("apps")).expect("create apps dir");
        let ctx = Self {
            root,
            xdg_config_home: None,
        };
        ctx.write_config("[core]\nAPPS_DIR = apps\n");
        ctx
    }

    /// The fake home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// The descriptor directory.
    pub fn apps_dir(&self) -> PathBuf {
        self.root.path().join("apps")
    }

    /// Path of the main configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("dotstatus.cfg")
    }

    /// Overwrite the main configuration file.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("write main config");
    }

    /// Write `<id>.cfg` into `dir` with the given display name and patterns.
    pub fn write_descriptor_in(&self, dir: &Path, id: &str, name: &str, files: &[&str]) {
        std::fs::create_dir_all(dir).expect("create descriptor dir");
        let mut content = format!("[application]\nname = {name}\n\n[configuration_files]\n");
        for file in files {
            content.push_str(file);
            content.push('\n');
        }
        std::fs::write(dir.join(format!("{id}.cfg")), content).expect("write descriptor");
    }

    /// Write `<id>.cfg` into the default apps directory.
    pub fn write_descriptor(&self, id: &str, name: &str, files: &[&str]) {
        self.write_descriptor_in(&self.apps_dir(), id, name, files);
    }

    /// Create `home/<rel>` (and its parents) with some content.
    pub fn write_home_file(&self, rel: &str) -> PathBuf {
        let path = self.home().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home file parent");
        }
        std::fs::write(&path, "content").expect("write home file");
        path
    }

    /// Use `dir` as `$XDG_CONFIG_HOME`.
    pub fn set_xdg_config_home(&mut self, dir: PathBuf) {
        self.xdg_config_home = Some(dir);
    }

    /// The environment this context describes.
    pub fn env(&self) -> Environment {
        Environment::new(self.home(), self.xdg_config_home.clone())
    }

    /// Load the main configuration, anchoring `APPS_DIR` at the temp root.
    pub fn load_config(&self) -> Configuration {
        Configuration::load(&self.config_path(), self.root.path(), &self.env())
            .expect("load config")
    }

    /// Load the application database from the configured directories.
    pub fn load_database(&self, config: &Configuration) -> ApplicationDatabase {
        ApplicationDatabase::load(&config.apps_dirs, &self.env()).expect("load app database")
    }

    /// Build the classifier selected by `config` with the real executor.
    pub fn classifier(&self, config: &Configuration) -> Box<dyn StatusClassifier> {
        classify::build(config, &self.env(), &SystemExecutor).expect("build classifier")
    }

    /// Load everything and scan every application.
    pub fn scan(&self) -> Vec<AppReport> {
        self.scan_with(|_| {})
    }

    /// Load everything, let `adjust` tweak the configuration, then scan.
    pub fn scan_with(&self, adjust: impl FnOnce(&mut Configuration)) -> Vec<AppReport> {
        let mut config = self.load_config();
        adjust(&mut config);
        let db = self.load_database(&config);
        let classifier = self.classifier(&config);
        scan_applications(
            &db,
            &config,
            classifier.as_ref(),
            &self.home(),
            &AppSelection::default(),
        )
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context using the base method.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Replace the `[core]` options after `APPS_DIR`, and optionally add
    /// `[ignore_paths]` entries.
    pub fn with_core(self, core: &str, ignore: &[&str]) -> Self {
        let mut content = format!("[core]\nAPPS_DIR = apps\n{core}\n");
        if !ignore.is_empty() {
            content.push_str("\n[ignore_paths]\n");
            for pattern in ignore {
                content.push_str(pattern);
                content.push('\n');
            }
        }
        self.ctx.write_config(&content);
        self
    }

    /// Add an application descriptor.
    pub fn with_app(self, id: &str, name: &str, files: &[&str]) -> Self {
        self.ctx.write_descriptor(id, name, files);
        self
    }

    /// Create a file under the fake home directory.
    pub fn with_home_file(self, rel: &str) -> Self {
        self.ctx.write_home_file(rel);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
