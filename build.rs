use std::env;
use std::path::Path;
use std::process::Command;

/// Files whose change means `HEAD` may point somewhere new.
const GIT_WATCH: [&str; 3] = [".git/HEAD", ".git/refs", ".git/packed-refs"];

fn main() {
    let build_info = format!(
        "{} {}/{}",
        git_describe().unwrap_or_else(|| "unknown".into()),
        env_or_unknown("PROFILE"),
        env_or_unknown("TARGET"),
    );
    println!("cargo:rustc-env=RUSTYDOOM_BUILD_INFO={build_info}");

    println!("cargo:rerun-if-env-changed=GIT_DIR");
    for watched in GIT_WATCH.iter().map(Path::new).filter(|p| p.exists()) {
        println!("cargo:rerun-if-changed={}", watched.display());
    }
}

/// Short commit hash, suffixed with `-dirty` when the tree has local edits.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;
    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}

fn env_or_unknown(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| "unknown".into())
}
