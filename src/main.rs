//! Ravan Archery entry point
//!
//! Runs the archery stage headless with the demo archer and logs the result.
//! Usage: `ravan-archery [settings.json]`

use std::path::PathBuf;

use ravan_archery::Settings;
use ravan_archery::autoplay::run_demo;

fn main() {
    env_logger::init();
    log::info!("Ravan Archery (headless demo) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref());

    let report = run_demo(&settings);
    log::info!(
        "{} arrows, {} hits, {:.1}s of play",
        report.launches,
        report.hits,
        report.elapsed_ms as f64 / 1000.0
    );

    let hud = &report.final_hud;
    println!("{}", hud.health_label);
    println!("{}", hud.stats_label);
    if report.completed {
        println!("Victory! Ravan has been defeated!");
    } else {
        println!("Ravan still stands after {} arrows", report.launches);
    }

    match serde_json::to_string(&report) {
        Ok(json) => log::debug!("{}", json),
        Err(e) => log::warn!("Could not serialize report: {}", e),
    }
}
