//! Build script for Vismaya
//!
//! Bumps the build counter and embeds build metadata as compile-time env vars.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

fn main() {
    println!("cargo:rerun-if-changed=src");

    let counter = Path::new(COUNTER_FILE);
    let previous: u64 = fs::read_to_string(counter)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let build_number = previous + 1;

    fs::write(counter, build_number.to_string()).expect("Failed to write build number file");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=VISMAYA_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=VISMAYA_BUILD_TIMESTAMP={}", timestamp);
}
