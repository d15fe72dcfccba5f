use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use taigi_core::converter::{convert, to_tone_mark, to_tone_number};
use taigi_core::orthography::{Orthography, Romanization};

static INPUTS: &[(&str, &str)] = &[
    ("short", "Tâi-gí"),
    ("medium", "Guá sī Tâi-uân-lâng, guá kóng Tâi-gí."),
    (
        "long",
        "Tsa-bóo-lâng tsiah-pá bô tāi-tsì, tsáu-khì tshuē in tshù-pinn ê lāu-a-pô \
         khai-káng, kóng kàu jit-thâu lo̍h-suann, tsiah tńg-khì tshù-lāi tsú àm-tǹg.",
    ),
];

fn bench_tl_to_poj(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/tl_poj");
    for &(label, text) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, text.len()), &text, |b, &text| {
            b.iter(|| convert(text, Orthography::Tl, Orthography::Poj));
        });
    }
    group.finish();
}

fn bench_tl_to_zhuyin(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/tl_zhuyin");
    for &(label, text) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, text.len()), &text, |b, &text| {
            b.iter(|| convert(text, Orthography::Tl, Orthography::Zhuyin));
        });
    }
    group.finish();
}

fn bench_tone_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/tone_round_trip");
    for &(label, text) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, text.len()), &text, |b, &text| {
            b.iter(|| to_tone_mark(&to_tone_number(text), Romanization::Tl));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_tl_to_poj,
    bench_tl_to_zhuyin,
    bench_tone_round_trip
);
criterion_main!(benches);
