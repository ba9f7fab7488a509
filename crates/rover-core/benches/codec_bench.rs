//! Criterion benchmarks for the rover wire codec.
//!
//! The control path runs once per operator input and the video path once
//! per frame (30+ Hz), so both encode and decode must stay far below a
//! millisecond.  These are fixed-size big-endian moves and should measure
//! in nanoseconds; the benchmark exists to catch accidental regressions
//! (allocation, bounds-check pileups) rather than to tune anything.
//!
//! Run with:
//! ```bash
//! cargo bench --package rover-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rover_core::protocol::codec::{
    decode_control_record, decode_frame_header, encode_control_record, encode_frame_header,
};
use rover_core::protocol::messages::ControlRecord;

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn make_drive_record() -> ControlRecord {
    ControlRecord {
        control: 19,
        rotation: 0,
        x_pan: -45,
        y_pan: -45,
    }
}

fn make_extreme_record() -> ControlRecord {
    ControlRecord {
        control: i32::MAX,
        rotation: i32::MIN,
        x_pan: -180,
        y_pan: 180,
    }
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks control-record encode and decode.
fn bench_control_record(c: &mut Criterion) {
    let records: &[(&str, ControlRecord)] = &[
        ("drive", make_drive_record()),
        ("extreme", make_extreme_record()),
        ("zeroed", ControlRecord::zeroed()),
    ];

    let mut group = c.benchmark_group("control_record");
    for (name, rec) in records {
        group.bench_with_input(BenchmarkId::new("encode", name), rec, |b, rec| {
            b.iter(|| encode_control_record(black_box(rec)))
        });
        let bytes = encode_control_record(rec);
        group.bench_with_input(BenchmarkId::new("decode", name), &bytes, |b, bytes| {
            b.iter(|| decode_control_record(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks the frame length prefix, the only per-frame codec work.
fn bench_frame_header(c: &mut Criterion) {
    let sizes: &[(&str, usize)] = &[("small_frame", 4_096), ("typical_jpeg", 31_744)];

    let mut group = c.benchmark_group("frame_header");
    for (name, len) in sizes {
        group.bench_with_input(BenchmarkId::new("encode", name), len, |b, &len| {
            b.iter(|| encode_frame_header(black_box(len)).expect("encode must succeed"))
        });
        let header = encode_frame_header(*len).expect("encode must succeed for benchmark setup");
        group.bench_with_input(BenchmarkId::new("decode", name), &header, |b, header| {
            b.iter(|| decode_frame_header(black_box(header)).expect("decode must succeed"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_control_record, bench_frame_header);
criterion_main!(benches);
