//! Build script for Larder
//!
//! Embeds a build number and timestamp. The number comes from
//! `LARDER_BUILD_NUMBER` when set (CI), otherwise from `build_number.txt`,
//! which is bumped on every recompilation.

use std::env;
use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

fn next_local_build_number() -> u64 {
    let path = Path::new(BUILD_NUMBER_FILE);

    let current: u64 = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let next = current + 1;

    // A read-only checkout still builds; it just keeps reporting the same number
    if let Err(e) = fs::write(path, next.to_string()) {
        println!("cargo:warning=Could not update {}: {}", BUILD_NUMBER_FILE, e);
    }
    next
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=LARDER_BUILD_NUMBER");

    let build_number = env::var("LARDER_BUILD_NUMBER")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(next_local_build_number);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=LARDER_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=LARDER_BUILD_TIMESTAMP={}", timestamp);
}
