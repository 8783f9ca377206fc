use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qgrid_core::Circuit;
use qgrid_sim::{Simulator, SimulatorConfig};

fn create_ghz_circuit(num_qubits: usize) -> Circuit {
    let mut circuit = Circuit::new(num_qubits);

    // H on first qubit
    circuit.add_gate("h", None, &[0]).unwrap();

    // CNOT chain
    for i in 0..(num_qubits - 1) {
        circuit.add_gate("cx", None, &[i, i + 1]).unwrap();
    }

    circuit
}

/// GHZ preparation built from a registered 2-qubit "link" gate, so the
/// decomposer runs on every iteration
fn create_composite_ghz_circuit(num_qubits: usize) -> Circuit {
    let mut link = Circuit::new(2);
    link.add_gate("cx", None, &[0, 1]).unwrap();

    let mut circuit = Circuit::new(num_qubits);
    circuit.register_gate("link", link.save()).unwrap();
    circuit.add_gate("h", None, &[0]).unwrap();
    for i in 0..(num_qubits - 1) {
        circuit.add_gate("link", None, &[i, i + 1]).unwrap();
    }
    circuit
}

fn bench_ghz(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_prep");

    for num_qubits in [8, 12, 16].iter() {
        for (label, circuit) in [
            ("primitive", create_ghz_circuit(*num_qubits)),
            ("composite", create_composite_ghz_circuit(*num_qubits)),
        ] {
            let mut sim = Simulator::new(circuit, SimulatorConfig::deterministic(42)).unwrap();
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}q", num_qubits)),
                num_qubits,
                |b, _| {
                    b.iter(|| {
                        sim.run(black_box(&[] as &[u8])).unwrap();
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_ghz);
criterion_main!(benches);
