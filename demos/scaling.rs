//! # Search effort vs. exhaustive enumeration
//!
//! For growing entity counts, compares the number of partitions the oracle
//! would visit with the states the branch-and-bound search actually enters.
//! Affinities come from a small deterministic generator so runs repeat.

use affinity_partition::{partition_count, AffinityMatrix, Optimizer, OptimizerConfig};

/// Deterministic pseudo-random affinities in -10..=10 (linear congruential).
fn synthetic_matrix(names: &[String], seed: u64) -> AffinityMatrix {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) % 21) as f64 - 10.0
    };
    let mut matrix = AffinityMatrix::new();
    for from in names {
        matrix.add_entity(from.as_str());
        for to in names {
            if from != to {
                matrix.set(from.as_str(), to.as_str(), next());
            }
        }
    }
    matrix
}

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║  Branch-and-bound vs. exhaustive partition count (K = 3)            ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    let optimizer = Optimizer::new(OptimizerConfig::new(3));
    println!(
        "  {:>3}  {:>12}  {:>10}  {:>10}  {:>10}  {:>10}",
        "n", "partitions", "states", "memo hits", "pruned", "best"
    );

    for n in 2..=10usize {
        let names: Vec<String> = (0..n).map(|i| format!("E{i:02}")).collect();
        let matrix = synthetic_matrix(&names, 0x5eed + n as u64);
        let outcome = match optimizer.run(&names, &matrix) {
            Ok(o) => o,
            Err(err) => {
                eprintln!("n={n}: {err}");
                continue;
            }
        };
        println!(
            "  {:>3}  {:>12}  {:>10}  {:>10}  {:>10}  {:>10.1}",
            n,
            partition_count(n, 3),
            outcome.stats.states_explored,
            outcome.stats.memo_hits,
            outcome.stats.pruned_branches,
            outcome.score,
        );
    }
    println!();
}
