use std::env;

fn main() {
    // Allow release tooling to stamp a version other than the manifest one
    let version = env::var("GAUNTLET_VERSION")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.1".to_string()));

    println!("cargo:rustc-env=GAUNTLET_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=GAUNTLET_VERSION");
    println!("cargo:rerun-if-env-changed=GIT_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_TIME");
}
