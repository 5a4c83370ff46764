//! Progress logging for the play-tree walk.

use std::time::Instant;

use crate::perft::Perft;

/// Get current process memory usage in bytes (RSS - Resident Set Size).
/// Returns None if unable to determine.
///
/// Read from procfs, so only Linux reports it; elsewhere progress lines
/// omit the `mem=` field.
#[cfg(target_os = "linux")]
pub fn get_memory_usage() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}

#[cfg(not(target_os = "linux"))]
pub fn get_memory_usage() -> Option<u64> {
    None
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Timing state for periodic progress lines.
pub struct Stats {
    start_time: Instant,
    last_log_time: Instant,
    last_log_nodes: u64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            last_log_nodes: 0,
        }
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        self.last_log_time.elapsed().as_secs() >= interval_secs
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self, perft: &Perft, stack_len: usize) {
        let now = Instant::now();
        let elapsed_total = self.start_time.elapsed().as_secs();
        let elapsed_since_log = self.last_log_time.elapsed().as_secs_f64();
        let nodes = perft.total_nodes();

        let rate = if elapsed_since_log > 0.0 {
            (nodes - self.last_log_nodes) as f64 / elapsed_since_log
        } else {
            0.0
        };

        let mem_str = get_memory_usage()
            .map(|m| format!(" mem={}", format_bytes(m)))
            .unwrap_or_default();

        println!(
            "[{:02}:{:02}:{:02}] nodes={} rate={:.0}/s stack={}{}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            nodes,
            rate,
            stack_len,
            mem_str,
        );
        let deepest = perft
            .plies()
            .iter()
            .rposition(|ply| ply.nodes > 0)
            .unwrap_or(0);
        let ply = &perft.plies()[deepest];
        println!(
            "           ply {}: nodes={} distinct={} dances={} terminals={}",
            deepest,
            ply.nodes,
            ply.distinct(),
            ply.dances,
            ply.terminals,
        );

        self.last_log_time = now;
        self.last_log_nodes = nodes;
    }

    /// Print final summary, one row per ply
    pub fn print_summary(&self, perft: &Perft) {
        println!(
            "{:>4} {:>16} {:>14} {:>12} {:>12}",
            "ply", "nodes", "distinct", "dances", "terminals"
        );
        for (depth, ply) in perft.plies().iter().enumerate() {
            println!(
                "{:>4} {:>16} {:>14} {:>12} {:>12}",
                depth,
                ply.nodes,
                ply.distinct(),
                ply.dances,
                ply.terminals
            );
        }
        println!("Total nodes: {}", perft.total_nodes());
        println!("Max stack depth: {}", perft.max_stack);

        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            println!(
                "Total time: {:.1}s ({:.0} nodes/sec)",
                elapsed,
                perft.total_nodes() as f64 / elapsed
            );
        }
    }
}
