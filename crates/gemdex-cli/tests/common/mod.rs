use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// RPC URL the default configuration intercepts.
pub const GEMS_URL: &str =
    "https://gemini.google.com/_/BardChatUi/data/batchexecute?rpcids=CNgdBe&_reqid=100";

/// A captured Gem list response: two real Gems and a placeholder.
pub const GEMS_BODY: &str = r#")]}'

182
[["wrb.fr","CNgdBe","[null,null,[[\"gem-writer\",[\"Writer\"],\"Drafts blog posts\"],[\"gem-ghost\",[\"Unknown Gem\"],\"\"],[\"gem-coder\",[\"Coder\"],\"Reviews code\"]]]",null,null,null,"generic"]]
25
[["di",42],["af.httprm",42,"1",1]]
"#;

/// Isolated cache directory plus a captured body on disk.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("body.txt"), GEMS_BODY).expect("Failed to write body");
        Self { dir }
    }

    pub fn store(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    pub fn body(&self) -> PathBuf {
        self.dir.path().join("body.txt")
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Run the CLI against this sandbox's cache.
    pub fn run(&self, args: &[&str]) -> Output {
        run_cli(args, &self.store())
    }

    /// Run the CLI and expect success, returning stdout.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn ingest(&self) -> String {
        let body = self.body();
        self.run_success(&["ingest", path_str(&body), "--url", GEMS_URL])
    }
}

pub fn run_cli(args: &[&str], store: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gemdex"));
    cmd.args(args);
    cmd.arg("--store").arg(store);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}
