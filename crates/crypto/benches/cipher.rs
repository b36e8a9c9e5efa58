use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::hint::black_box;

use twinscan_crypto::catalog::AlgorithmId;
use twinscan_crypto::provider::ProviderContext;
use twinscan_crypto::symmetric::mode::{BlockMode, Padding};
use twinscan_crypto::symmetric::{Direction, KeyMaterial};

const ALGORITHMS: &[(AlgorithmId, &str)] = &[
    (AlgorithmId::Aes256, "aes256"),
    (AlgorithmId::Blowfish128, "blowfish128"),
    (AlgorithmId::Cast5, "cast5"),
    (AlgorithmId::Arc4_128, "arc4-128"),
    (AlgorithmId::Threefish256, "threefish256"),
    (AlgorithmId::Threefish512, "threefish512"),
    (AlgorithmId::Threefish1024, "threefish1024"),
];

fn data(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut res = vec![0; size];
    rng.fill_bytes(&mut res);
    res
}

fn make_key(id: AlgorithmId) -> KeyMaterial {
    let d = id.descriptor();
    KeyMaterial::new(data(d.key_len, 0), data(d.block_len, 1))
}

fn encrypt(ctx: &ProviderContext, id: AlgorithmId, key: &KeyMaterial, plaintext: &[u8]) -> Vec<u8> {
    let session = ctx
        .session(id, BlockMode::Cbc, Padding::Pkcs7, Direction::Encrypt, key)
        .unwrap();
    session.finalize(plaintext).unwrap()
}

fn bench_encrypt(c: &mut Criterion) {
    let ctx = ProviderContext::new();
    let mut group = c.benchmark_group("encrypt");

    for size in [1024, 16 * 1024, 1024 * 1024] {
        for &(id, name) in ALGORITHMS {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                let key = make_key(id);
                let plaintext = data(size, 2);
                b.iter(|| black_box(encrypt(&ctx, id, &key, &plaintext)));
            });
        }
    }
}

fn bench_decrypt(c: &mut Criterion) {
    let ctx = ProviderContext::new();
    let mut group = c.benchmark_group("decrypt");

    for size in [1024, 16 * 1024, 1024 * 1024] {
        for &(id, name) in ALGORITHMS {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                let key = make_key(id);
                let ciphertext = encrypt(&ctx, id, &key, &data(size, 2));
                b.iter(|| {
                    let session = ctx
                        .session(id, BlockMode::Cbc, Padding::Pkcs7, Direction::Decrypt, &key)
                        .unwrap();
                    black_box(session.finalize(&ciphertext).unwrap())
                });
            });
        }
    }
}

fn bench_kdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdf");

    for total in [32usize, 64, 256] {
        group.bench_with_input(BenchmarkId::new("stretch", total), &total, |b, &total| {
            b.iter(|| {
                black_box(
                    twinscan_crypto::kdf::stretch("benchmark passphrase", total / 2, total / 2)
                        .unwrap(),
                )
            });
        });
    }
}

criterion_group!(benches, bench_encrypt, bench_decrypt, bench_kdf);
criterion_main!(benches);
