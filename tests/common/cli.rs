use issue_desk::model::Issue;
use issue_desk::storage::write_jsonl;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};
use tempfile::TempDir;

pub struct DeskWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub log_dir: PathBuf,
}

impl DeskWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let log_dir = root.join("logs");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            temp_dir,
            root,
            log_dir,
        }
    }

    /// Write `issues` as a JSONL snapshot under the workspace root.
    pub fn write_snapshot(&self, name: &str, issues: &[Issue]) -> PathBuf {
        let path = self.root.join(name);
        let file = File::create(&path).expect("create snapshot");
        let mut writer = BufWriter::new(file);
        write_jsonl(&mut writer, issues).expect("write snapshot");
        path
    }

    /// Write the project config file read from the workspace root.
    pub fn write_project_config(&self, contents: &str) {
        let dir = self.root.join(".issue-desk");
        fs::create_dir_all(&dir).expect("config dir");
        fs::write(dir.join("config.yaml"), contents).expect("write config");
    }
}

#[derive(Debug)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

impl RunOutput {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }

    /// Structured error printed on stderr, skipping any log lines before it.
    pub fn stderr_json(&self) -> serde_json::Value {
        let start = if self.stderr.starts_with('{') {
            0
        } else {
            self.stderr
                .find("\n{")
                .map(|idx| idx + 1)
                .unwrap_or_else(|| panic!("no JSON on stderr: {}", self.stderr))
        };
        serde_json::from_str(&self.stderr[start..])
            .unwrap_or_else(|e| panic!("stderr is not JSON ({e}): {}", self.stderr))
    }
}

pub fn run_idesk<I, S>(workspace: &DeskWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    run_idesk_with_env(workspace, args, std::iter::empty::<(&str, &str)>(), label)
}

pub fn run_idesk_with_env<I, S, E, K, V>(
    workspace: &DeskWorkspace,
    args: I,
    env_vars: E,
    label: &str,
) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("idesk"));
    cmd.current_dir(&workspace.root);
    cmd.args(args.into_iter().map(|arg| arg.as_ref().to_string()));

    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "issue_desk=warn");
    cmd.env("RUST_BACKTRACE", "1");
    cmd.env("HOME", &workspace.root);
    // Per-test variables win over the defaults above.
    for (key, value) in env_vars {
        cmd.env(key.as_ref(), value.as_ref());
    }

    let start = Instant::now();
    let output = cmd.output().expect("run idesk");
    let duration = start.elapsed();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let timestamp = chrono::Utc::now().to_rfc3339();
    let log_body = format!(
        "label: {label}\nstarted: {timestamp}\nduration: {duration:?}\nstatus: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    fs::write(&log_path, log_body).expect("write log");

    RunOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
        duration,
        log_path,
    }
}

pub fn snapshot_arg(path: &Path) -> String {
    path.display().to_string()
}
