//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `biotracker_core` linkage and
//!   database bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use biotracker_core::db::{migrations, open_db_in_memory};
use biotracker_core::Config;

fn main() {
    let config = Config::from_env();
    println!("biotracker_core version={}", biotracker_core::core_version());
    println!("configured database={:?}", config.database);
    println!("latest schema version={}", migrations::latest_version());

    match open_db_in_memory() {
        Ok(_) => println!("in-memory bootstrap=ok"),
        Err(err) => {
            eprintln!("in-memory bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
