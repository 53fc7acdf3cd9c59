//! Benchmarks for potential construction
//!
//! Run with: cargo bench -p qpot-potentials

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use qpot_potentials::{HarmonicPotential, Potential, SynthesisStyle};

fn harmonic(num_qubits: u32) -> HarmonicPotential {
    HarmonicPotential::new(num_qubits, 1.0, 1.0, -4.0, 8.0 / f64::from(1u32 << num_qubits))
        .expect("valid parameters")
}

/// Benchmark evolution circuit synthesis
fn bench_evolution_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution_circuit");

    for num_qubits in [4u32, 8, 12, 16, 24] {
        let decomposed = harmonic(num_qubits);
        let native = decomposed.clone().with_synthesis(SynthesisStyle::ControlledPhase);

        group.bench_with_input(
            BenchmarkId::new("decomposed", num_qubits),
            &decomposed,
            |b, h| b.iter(|| h.evolution_circuit(black_box(None)).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("controlled_phase", num_qubits),
            &native,
            |b, h| b.iter(|| h.evolution_circuit(black_box(None)).unwrap()),
        );
    }

    group.finish();
}

/// Benchmark dense matrix construction
fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix");

    for num_qubits in [4u32, 8, 10] {
        let h = harmonic(num_qubits);
        group.bench_with_input(BenchmarkId::new("harmonic", num_qubits), &h, |b, h| {
            b.iter(|| h.matrix().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evolution_circuit, bench_matrix);
criterion_main!(benches);
