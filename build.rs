use std::env;

fn main() {
    // Select the driver-board pin preset at build time (optional).
    // The two supported ESC board revisions carry the same power stage with
    // different pin routing, so the preset is plain configuration data.
    if let Ok(board) = env::var("ESC_BOARD") {
        println!("cargo:rustc-env=ESC_BOARD={}", board);
        println!("cargo:warning=Using ESC_BOARD from environment: {}", board);
    } else {
        println!("cargo:rustc-env=ESC_BOARD=f80a");
    }

    println!("cargo:rerun-if-env-changed=ESC_BOARD");
}
