use criterion::{criterion_group, criterion_main, Criterion};
use std::process::Command;

fn benchmark_jobtrack_startup(c: &mut Criterion) {
    c.bench_function("jobtrack --version", |b| {
        b.iter(|| {
            Command::new("./target/release/jobtrack")
                .arg("--version")
                .output()
                .expect("Failed to execute jobtrack --version")
        })
    });
}

// Requires a running backend (JOBTRACK_API_URL) with some records
fn benchmark_jobtrack_list(c: &mut Criterion) {
    c.bench_function("jobtrack list", |b| {
        b.iter(|| {
            Command::new("./target/release/jobtrack")
                .arg("list")
                .output()
                .expect("Failed to execute jobtrack list")
        })
    });
}

fn benchmark_jobtrack_list_filtered(c: &mut Criterion) {
    c.bench_function("jobtrack list filtered", |b| {
        b.iter(|| {
            Command::new("./target/release/jobtrack")
                .args(["list", "--query", "engineer", "--status", "APPLIED"])
                .output()
                .expect("Failed to execute jobtrack list with filters")
        })
    });
}

criterion_group!(
    benches,
    benchmark_jobtrack_startup,
    benchmark_jobtrack_list,
    benchmark_jobtrack_list_filtered
);
criterion_main!(benches);
