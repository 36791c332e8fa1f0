//! Build script for the RYLR998 node firmware
//!
//! Handles:
//! - Linker scripts for the embedded binary (memory.x comes from embassy-stm32)
//! - Nothing for host builds, so tests link normally

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target = std::env::var("TARGET").unwrap_or_default();
    if !target.starts_with("thumb") {
        return;
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
