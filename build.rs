use std::env;
use std::process::Command;

const PREFIX: &str = "FINANCE_HUB_BUILD";

fn main() {
    for watched in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={watched}");
    }
    println!("cargo:rerun-if-env-changed={PREFIX}_HASH");

    // Packagers without a git checkout can pin the hash explicitly.
    let hash = env::var(format!("{PREFIX}_HASH"))
        .ok()
        .or_else(|| stdout_of("git", &["rev-parse", "--short", "HEAD"]));
    emit("HASH", hash);

    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    emit("TIMESTAMP", Some(built_at));
    emit("PROFILE", env::var("PROFILE").ok());

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".into());
    emit("RUSTC", stdout_of(&rustc, &["--version"]));
}

fn emit(key: &str, value: Option<String>) {
    let value = value.unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env={PREFIX}_{key}={value}");
}

/// Trimmed stdout of a successful command, `None` on any failure.
fn stdout_of(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
