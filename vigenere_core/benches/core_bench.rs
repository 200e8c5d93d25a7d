use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use vigenere_core::{CaesarCipher, FrequencyProfile, VigenereCipher, shift_text};

const CORPUS: &str = include_str!("../tests/vectors/english_corpus.txt");

fn bench_shift_with_offset(c: &mut Criterion) {
    let mut group = c.benchmark_group("shift_with_offset");
    let cipher = CaesarCipher::new(0, FrequencyProfile::english());
    let base = "A".repeat(1024);
    for exp in [0u32, 4, 8, 12] {
        let input = base.repeat(1 << exp);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(input.len()), &input, |b, input| {
            b.iter(|| black_box(cipher.shift_with_offset(input, 3)))
        });
    }
    group.finish();
}

fn bench_vigenere(c: &mut Criterion) {
    let mut group = c.benchmark_group("vigenere");
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let text: String = (0..64 * 1024)
        .map(|_| char::from(rng.gen_range(b' '..=b'~')))
        .collect();
    let cipher = VigenereCipher::new("SECRETKEY").unwrap();
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("encrypt_64k", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(text.len());
            cipher.shift(text.as_bytes(), &mut out, false).unwrap();
            black_box(out)
        })
    });
    group.finish();
}

fn bench_crack(c: &mut Criterion) {
    let mut group = c.benchmark_group("crack");
    let cipher = CaesarCipher::new(0, FrequencyProfile::english());
    for repeats in [1usize, 64] {
        let encrypted = shift_text(&CORPUS.repeat(repeats), 17);
        group.throughput(Throughput::Bytes(encrypted.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(encrypted.len()),
            &encrypted,
            |b, encrypted| {
                b.iter(|| {
                    let mut out = Vec::new();
                    black_box(cipher.crack(encrypted.as_bytes(), &mut out).unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_shift_with_offset, bench_vigenere, bench_crack);
criterion_main!(benches);
