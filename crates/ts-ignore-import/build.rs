use std::process::Command;

use chrono::Utc;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/");

    let version = env!("CARGO_PKG_VERSION");
    let version_string = match git_short_hash() {
        Some(hash) if !is_tagged_release(version) => {
            let build_date = Utc::now().format("%Y-%m-%d").to_string();
            format!("{version}+{hash}.{build_date}")
        }
        _ => version.to_owned(),
    };

    println!("cargo:rustc-env=TS_IGNORE_IMPORT_VERSION={version_string}");
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8(output.stdout).ok()?.trim().to_owned())
}

fn git_short_hash() -> Option<String> {
    git_output(&["rev-parse", "--short", "HEAD"]).filter(|hash| !hash.is_empty())
}

fn is_tagged_release(version: &str) -> bool {
    let expected_tag = format!("v{version}");
    git_output(&["tag", "--points-at", "HEAD"])
        .is_some_and(|tags| tags.lines().any(|line| line.trim() == expected_tag))
}
