//! Host-side helper: `cargo run` builds the WASM bundle into static/pkg and
//! serves `static/` on http://127.0.0.1:8000.

use std::process::{Command, ExitCode, Stdio};

const PORT: &str = "8000";

fn main() -> ExitCode {
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{} …", PORT);
    let server = Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn();

    match server.and_then(|mut child| child.wait()) {
        Ok(status) if status.success() => ExitCode::SUCCESS,
        Ok(status) => {
            eprintln!("http server exited with {}", status);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("failed to start http server: {}", err);
            ExitCode::FAILURE
        }
    }
}
