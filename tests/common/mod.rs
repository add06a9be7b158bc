//! Shared test utilities for CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_traffic_model("models/traffic");
//!     fixture.command().arg("convert").arg("models").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::models;
    pub use super::TestFixture;
}

/// Rodin XML snippets for hand-built models.
#[allow(dead_code)]
pub mod models {
    /// The traffic light fixture shipped in `tests/testdata/traffic`.
    pub const TRAFFIC: [(&str, &str); 4] = [
        ("C0.buc", include_str!("../testdata/traffic/C0.buc")),
        ("C1.buc", include_str!("../testdata/traffic/C1.buc")),
        ("M0.bum", include_str!("../testdata/traffic/M0.bum")),
        ("M1.bum", include_str!("../testdata/traffic/M1.bum")),
    ];

    /// A context without content.
    pub const EMPTY_CONTEXT: &str = "<org.eventb.core.contextFile/>";

    /// A context extending the given contexts.
    pub fn context_extending(targets: &[&str]) -> String {
        let clauses: String = targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                format!(
                    "<org.eventb.core.extendsContext name=\"e{}\" org.eventb.core.target=\"{}\"/>\n",
                    i, target
                )
            })
            .collect();
        format!(
            "<org.eventb.core.contextFile>\n{}</org.eventb.core.contextFile>\n",
            clauses
        )
    }

    /// A machine seeing the given contexts.
    pub fn machine_seeing(targets: &[&str]) -> String {
        let clauses: String = targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                format!(
                    "<org.eventb.core.seesContext name=\"s{}\" org.eventb.core.target=\"{}\"/>\n",
                    i, target
                )
            })
            .collect();
        format!(
            "<org.eventb.core.machineFile>\n{}</org.eventb.core.machineFile>\n",
            clauses
        )
    }
}

/// A temporary working directory holding model files.
///
/// Commands created with [`TestFixture::command`] run inside it with color
/// disabled, so output can be matched as plain text.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Copy the traffic light model into `dir`.
    #[allow(dead_code)]
    pub fn with_traffic_model(self, dir: &str) -> Self {
        models::TRAFFIC
            .iter()
            .fold(self, |fixture, (name, content)| {
                fixture.with_file(&format!("{}/{}", dir, name), content)
            })
    }

    /// Add a `.eventb-to-txt.yaml` configuration file.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".eventb-to-txt.yaml", content)
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a file below the fixture directory.
    #[allow(dead_code)]
    pub fn join(&self, path: &str) -> PathBuf {
        self.temp_dir.path().join(path)
    }

    /// Read a file below the fixture directory.
    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.join(path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("eventb-to-txt");
        cmd.current_dir(self.path())
            .env_remove("EVENTB_TO_TXT_CONFIG")
            .env_remove("EVENTB_TO_TXT_OUTPUT")
            .env_remove("RUST_LOG")
            .args(["--color", "never"]);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_file() {
        let fixture = TestFixture::new().with_file("m/C0.buc", models::EMPTY_CONTEXT);
        assert!(fixture.path().join("m/C0.buc").exists());
    }

    #[test]
    fn test_fixture_with_traffic_model() {
        let fixture = TestFixture::new().with_traffic_model("traffic");
        for (name, _) in models::TRAFFIC {
            assert!(fixture.join(&format!("traffic/{}", name)).is_file());
        }
    }

    #[test]
    fn test_model_snippets_are_well_formed() {
        let context = models::context_extending(&["C0", "C1"]);
        assert_eq!(context.matches("extendsContext").count(), 2);
        assert!(models::machine_seeing(&[]).starts_with("<org.eventb.core.machineFile>"));
    }
}
