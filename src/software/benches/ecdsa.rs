use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use eckeys::{
    curve, hash, software::SoftwareBackend, Ecdsa, PrivateKey as _, PublicKey as _, Signer as _,
    Verifier as _,
};
use rand::{thread_rng, Rng};
use std::hint::black_box;

fn benchmark_sign(c: &mut Criterion) {
    let backend = SoftwareBackend::new();
    let mut msg = [0u8; 32];
    thread_rng().fill(&mut msg);
    c.bench_function(&format!("{}/sign msg_len={}", module_path!(), msg.len()), |b| {
        b.iter_batched(
            || eckeys::generate_private_key(&curve::SECP256R1, &backend, &mut thread_rng()).unwrap(),
            |key| {
                let mut signer = key.signer(Ecdsa::new(hash::SHA256)).unwrap();
                signer.update(&msg);
                black_box(signer.finalize().unwrap());
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_verify(c: &mut Criterion) {
    let backend = SoftwareBackend::new();
    let mut msg = [0u8; 32];
    thread_rng().fill(&mut msg);
    let key = eckeys::generate_private_key(&curve::SECP256R1, &backend, &mut thread_rng()).unwrap();
    let mut signer = key.signer(Ecdsa::new(hash::SHA256)).unwrap();
    signer.update(&msg);
    let signature = signer.finalize().unwrap();
    let public = key.public_key();
    c.bench_function(
        &format!("{}/verify msg_len={}", module_path!(), msg.len()),
        |b| {
            b.iter(|| {
                let mut verifier = public.verifier(&signature, Ecdsa::new(hash::SHA256)).unwrap();
                verifier.update(&msg);
                verifier.verify().unwrap();
            });
        },
    );
}

criterion_group!(benches, benchmark_sign, benchmark_verify);
criterion_main!(benches);
