//! End-of-run statistics printing.

use log::{debug, info};
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Logs a summary of per-domain failures and notable events.
///
/// Failures are logged at info level only when any occurred; the full
/// per-type breakdown goes to debug.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let total = stats.total_errors();
    if total > 0 {
        info!("{total} per-domain failure(s) during this run (none aborted the hunt):");
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("  {error_type}: {count}");
            }
        }
    } else {
        debug!("No per-domain failures during this run");
    }

    for info_type in InfoType::iter() {
        let count = stats.get_info_count(info_type);
        if count > 0 {
            debug!("{}: {count}", info_type.as_str());
        }
    }
}

/// Logs how long the hunt took and how many domains were resolved.
pub fn log_run_summary(start_time: std::time::Instant, domains: usize, mx_hosts: usize) {
    let elapsed = start_time.elapsed().as_secs_f64();
    info!(
        "Resolved {domains} domain(s) to {mx_hosts} unique MX host(s) in {elapsed:.2} seconds"
    );
}
