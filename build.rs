use std::env;
use std::process::Command;

/// `git rev-parse <args> HEAD`, or `None` outside a checkout.
fn rev_parse(args: &[&str]) -> Option<String> {
    let output = Command::new("git").arg("rev-parse").args(args).arg("HEAD").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn main() {
    // packaged sources have no .git; the packager can pass the hash in instead
    let pinned = env::var("CROSSWORD_DSL_GIT_HASH").ok().filter(|h| !h.is_empty());

    let full = pinned.clone().or_else(|| rev_parse(&[])).unwrap_or_else(|| "unknown".to_string());
    let short = match &pinned {
        Some(hash) => hash.chars().take(7).collect(),
        None => rev_parse(&["--short"]).unwrap_or_else(|| "unknown".to_string()),
    };

    // GIT_HASH goes into `crossword-dsl --version`, GIT_HASH_FULL into wasm `version()`
    println!("cargo:rustc-env=GIT_HASH={short}");
    println!("cargo:rustc-env=GIT_HASH_FULL={full}");

    println!("cargo:rerun-if-env-changed=CROSSWORD_DSL_GIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
