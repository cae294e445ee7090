//! Benchmarks for cix header encoding and framed transfers

use std::hint::black_box;
use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use cix::network::recv_exact;
use cix::protocol::{decode_header, encode_header, Command, Header};

fn codec_benchmarks(c: &mut Criterion) {
    let header = Header::with_filename(Command::Put, "benchmark-payload.bin")
        .map(|h| h.with_byte_count(1 << 20))
        .unwrap();
    let block = encode_header(&header);

    c.bench_function("encode_header", |b| b.iter(|| encode_header(black_box(&header))));
    c.bench_function("decode_header", |b| b.iter(|| decode_header(black_box(&block))));

    let payload = vec![0xabu8; 1 << 20];
    c.bench_function("recv_exact_1mb", |b| {
        b.iter(|| {
            let mut stream = Cursor::new(payload.as_slice());
            let mut buf = vec![0u8; payload.len()];
            recv_exact(&mut stream, &mut buf).unwrap();
            buf
        })
    });
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
