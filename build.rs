//! Build script for strip-clock.

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // 1) Build timestamp, used to seed a real-time clock that is not running
    let utc_offset_minutes = env_or_default("UTC_OFFSET_MINUTES", "0");
    let utc_offset_minutes: i64 = utc_offset_minutes
        .trim()
        .parse()
        .unwrap_or_else(|_| panic!("UTC_OFFSET_MINUTES must be an integer, got {utc_offset_minutes:?}"));
    assert!(
        (-24 * 60..=24 * 60).contains(&utc_offset_minutes),
        "UTC_OFFSET_MINUTES must be within one day"
    );
    let build_unix_seconds = i64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock is before 1970")
            .as_secs(),
    )
    .expect("build time fits in i64");
    let build_local_seconds = build_unix_seconds + utc_offset_minutes * 60;

    let build_time_path = out_dir.join("build_time.rs");
    let build_time = format!(
        "// Auto-generated by build.rs - do not edit manually\n\
         /// Local time of the build, in seconds since 1970-01-01 00:00:00.\n\
         pub const BUILD_LOCAL_UNIX_SECONDS: i64 = {build_local_seconds};\n\
         /// UTC offset applied to [`BUILD_LOCAL_UNIX_SECONDS`], in minutes.\n\
         pub const BUILD_UTC_OFFSET_MINUTES: i64 = {utc_offset_minutes};\n"
    );
    fs::write(&build_time_path, build_time).expect("Failed to write build_time.rs");

    // Refresh the timestamp whenever the sources change
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=demos");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=UTC_OFFSET_MINUTES");

    // 2) Handle memory.x based on target
    let target = env::var("TARGET").unwrap();

    if target.starts_with("thumbv8m") {
        // Pico 2 ARM: copy our custom memory-pico2.x to OUT_DIR as memory.x
        copy_memory_x("memory-pico2.x", &out_dir);
    } else if target.starts_with("thumbv6m") {
        // Pico 1: copy our custom memory-pico1.x to OUT_DIR as memory.x
        copy_memory_x("memory-pico1.x", &out_dir);
    }
}

fn copy_memory_x(source: &str, out_dir: &Path) {
    let memory_x =
        fs::read_to_string(source).unwrap_or_else(|_| panic!("Failed to read {source}"));
    let dest = out_dir.join("memory.x");
    fs::write(&dest, memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={source}");
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
