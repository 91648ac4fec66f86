//! Walkthrough of the sequence API using Fibonacci numbers and their running sums.
//!
//! Run with: cargo run --example basic_usage
//!
//! Set `AUTOSEQ_LOG=trace` to see cache growth events.

use autoseq::{AutoSeq, autoseq};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("AUTOSEQ_LOG"))
        .with_writer(std::io::stderr)
        .init();

    // F(n) = F(n-1) + F(n-2), F(0) = 0, F(1) = 1
    let fib: AutoSeq<'_, u64> = autoseq!(context: |c| c[c.n() - 1] + c[c.n() - 2]; 0u64, 1);
    // S(n) = S(n-1) + F(n), S(0) = 0
    let sum: AutoSeq<'_, u64> = autoseq!(context: |c| c.last() + fib.get(c.n()); 0u64);

    println!("--- Basic Access ---");
    println!("S[5]  = {}", sum.get(5));
    match sum.at(10) {
        Ok(value) => println!("S[10] = {}", value),
        Err(e) => println!("S[10] failed: {}", e),
    }
    println!("Current cache size: {}", sum.size());

    println!();
    println!("--- Range Access ---");
    let slice = sum.slice(3, 8);
    let rendered: Vec<String> = slice.iter().map(u64::to_string).collect();
    println!("S[3..8): {}", rendered.join(" "));
    drop(slice);

    println!();
    println!("--- Prefetch and Capacity ---");
    sum.reserve(100);
    sum.prefetch_up_to(20);
    println!("Size after prefetch: {}", sum.size());
    println!("Capacity: {}", sum.capacity());

    println!();
    println!("--- Views and Iteration ---");
    {
        let view = sum.view();
        if let (Some(front), Some(back)) = (view.first(), view.last()) {
            println!("View front: {}, back: {}", front, back);
        }
    }

    print!("Cached values up to 100:");
    for value in sum.iter().take_while(|&value| value <= 100) {
        print!(" {}", value);
    }
    println!();

    print!("All cached values:");
    for value in &sum {
        print!(" {}", value);
    }
    println!();

    println!();
    println!("--- Snapshots ---");
    let copy = sum.snapshot();
    println!("Snapshot copy size: {}", copy.len());

    let moved = sum.into_snapshot();
    println!("Moved snapshot size: {}", moved.len());
    println!("Fibonacci cache size: {}", fib.size());
}
