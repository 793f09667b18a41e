// Stages the static page into `dist/`. The wasm bundle itself comes from
// wasm-pack (see `cargo run`), which writes into static/pkg.
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        if let Err(err) = std::fs::remove_dir_all(out_dir) {
            println!("cargo:warning=could not clear dist/: {}", err);
        }
    }
    if let Err(err) = std::fs::create_dir_all(out_dir) {
        println!("cargo:warning=could not create dist/: {}", err);
        return;
    }

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }
    let options = CopyOptions {
        overwrite: true,
        content_only: true,
        ..CopyOptions::new()
    };
    if let Err(err) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ failed: {}", err);
    }
}
