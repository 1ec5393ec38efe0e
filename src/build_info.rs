//! Build metadata
//!
//! Build number and timestamp are injected by `build.rs` at compile time.

use serde::Serialize;

/// Incremented by the build script on every recompilation
pub const BUILD_NUMBER: u64 = match option_env!("VISMAYA_BUILD_NUMBER") {
    Some(s) => match parse_build_number(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// UTC compile time, `YYYY-MM-DDTHH:MM:SSZ`
pub const BUILD_TIMESTAMP: &str = match option_env!("VISMAYA_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

// str::parse is not const
const fn parse_build_number(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// Lines of the startup banner
    pub fn banner(&self) -> Vec<String> {
        let rule = "=".repeat(47);
        vec![
            rule.clone(),
            "  Vismaya Diet Planner".to_string(),
            format!("  Version: {} | Build: {}", self.version, self.build_number),
            format!("  Compiled: {}", self.build_timestamp),
            rule,
        ]
    }
}

/// Print the startup banner to stderr (stdout carries MCP frames)
pub fn print_startup_banner() {
    for line in BuildInfo::current().banner() {
        eprintln!("{}", line);
    }
}
