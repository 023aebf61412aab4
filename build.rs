// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use std::env;
use std::fs;
use std::path::Path;

/// Tile edge used by the blocked transpose kernels unless overridden.
const DEFAULT_TRANSPOSE_BLOCK: usize = 100;

fn main() {
    // Allow override via environment variable
    // Format: TRANSPOSE_BLOCK_OVERRIDE="64"
    let block = match env::var("TRANSPOSE_BLOCK_OVERRIDE").ok() {
        Some(val) => match val.trim().parse::<usize>() {
            Ok(b) if b > 0 => {
                println!("cargo:warning=TRANSPOSE_BLOCK_OVERRIDE applied: {}", b);
                b
            }
            _ => panic!(
                "Invalid TRANSPOSE_BLOCK_OVERRIDE. Expected a positive integer, e.g., \"64\""
            ),
        },
        None => DEFAULT_TRANSPOSE_BLOCK,
    };

    // Writes to a consts file, and reads at compile time for a dep-free constant
    let out_path = Path::new(&env::var("OUT_DIR").unwrap()).join("transpose_block.rs");

    fs::write(
        &out_path,
        format!(
            "
/// Auto-generated transpose tile edge from build.rs

/// Edge length of the square tiles walked by the blocked transpose kernels.
/// Defaults to {DEFAULT_TRANSPOSE_BLOCK}, or overridden via `TRANSPOSE_BLOCK_OVERRIDE`.
#[allow(non_upper_case_globals)]
pub const TRANSPOSE_BLOCK: usize = {block};
"
        ),
    )
    .unwrap();

    println!("cargo:rerun-if-env-changed=TRANSPOSE_BLOCK_OVERRIDE");
}
