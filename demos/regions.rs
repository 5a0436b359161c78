//! # Regional friendliness grouping
//!
//! Loads a directed friendliness table for eight regions, splits them into
//! at most three blocs with the branch-and-bound optimizer, proves the split
//! optimal by exhaustive enumeration and prints the gold/silver/bronze
//! ranking.
//!
//! ```bash
//! cargo run --example regions
//! RUST_LOG=affinity_partition=debug cargo run --example regions
//! ```

use affinity_partition::scoring::normalize_score;
use affinity_partition::{validate_optimality, AffinityMatrix, OptimizerConfig};
use tracing::Level;
use tracing_subscriber::EnvFilter;

// Row = who answers, column = about whom. "-" means no survey data.
const FRIENDLINESS: &str = "\
region,Hokkaido,Aomori,Tokyo,Kanagawa,Chiba,Osaka,Kyoto,Fukuoka
Hokkaido,-,14,2,1,-,-3,0,-
Aomori,16,-,-1,-,-2,-4,-,-
Tokyo,3,-,-,12,9,-6,4,1
Kanagawa,-,-,11,-,7,-5,2,-
Chiba,-,-1,13,6,-,-4,-,-
Osaka,-4,-5,-7,-6,-3,-,15,8
Kyoto,1,-,3,-,-,13,-,5
Fukuoka,-,-,-2,-,-,9,6,-
";

// ── Display helpers ───────────────────────────────────────────────────────────

fn bar(score: f64, max: f64) -> String {
    let ratio = if max > 0.0 { (score / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * 20.0).round() as usize;
    let empty = 20usize.saturating_sub(filled);
    format!("[{}{}] {:>6.1}", "█".repeat(filled), "░".repeat(empty), score)
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║  Regional friendliness — best split into at most three blocs        ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    let matrix = match AffinityMatrix::from_csv(FRIENDLINESS) {
        Ok(m) => m,
        Err(err) => {
            eprintln!("could not load table: {err}");
            std::process::exit(1);
        }
    };
    let regions = matrix.entities();
    println!("▶  Loaded {} regions: {}\n", regions.len(), regions.join(", "));

    let report = match validate_optimality(&regions, &matrix, &OptimizerConfig::default()) {
        Ok(r) => r,
        Err(err) => {
            eprintln!("optimisation failed: {err}");
            std::process::exit(1);
        }
    };

    println!("▶  Best partition\n");
    for (i, group) in report.partition.iter().enumerate() {
        println!("  Group {}: {}", i + 1, group.join(", "));
    }
    println!(
        "\n  Total score {:.1}  (per pair {:.3})",
        report.total_score,
        normalize_score(report.total_score, regions.len())
    );

    println!("\n▶  Ranking\n");
    let top = report
        .color_rankings
        .first()
        .map(|r| r.group_score)
        .unwrap_or(0.0);
    for r in &report.color_rankings {
        let label = r.rank.map(|rank| rank.label()).unwrap_or("-");
        let hex = r.hex_color.as_deref().unwrap_or("       ");
        println!(
            "  {:<7} {} {}  {}",
            label,
            hex,
            bar(r.group_score, top),
            r.members.join(", ")
        );
    }

    println!("\n▶  Verification\n");
    println!(
        "  Search {:.1} vs exhaustive {:.1} over {} partitions → {}",
        report.validation.algorithm_score,
        report.validation.exhaustive_best_score,
        report.validation.total_partitions,
        if report.is_optimal { "optimal ✓" } else { "MISMATCH ✗" },
    );
    println!(
        "  {} states, {} memo hits, {} pruned branches, {} cache entries",
        report.stats.states_explored,
        report.stats.memo_hits,
        report.stats.pruned_branches,
        report.stats.cache_entries,
    );
}
