/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use grd::grd_core::colorspace::ColorSpace;
use grd::grd_core::options::EncoderOptions;
use grd::{GrdDecoder, GrdEncoder};
use grd_benches::sample_image;

const WIDTH: usize = 1280;
const HEIGHT: usize = 720;

fn encode(pixels: &[u8]) -> Vec<u8> {
    let options = EncoderOptions::new(WIDTH, HEIGHT, ColorSpace::RGBA);
    let mut sink: Vec<u8> = Vec::with_capacity(pixels.len());
    GrdEncoder::new(pixels, options).encode(&mut sink).unwrap();
    sink
}

fn decode(data: &[u8]) -> Vec<u8> {
    GrdDecoder::new(data).decode().unwrap()
}

fn bench_codec(c: &mut Criterion) {
    let pixels = sample_image(WIDTH, HEIGHT, 4);
    let data = encode(&pixels);

    let mut group = c.benchmark_group("grd: 32 bit image");
    group.throughput(Throughput::Bytes(pixels.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| black_box(encode(pixels.as_slice())))
    });

    group.bench_function("decode", |b| {
        b.iter(|| black_box(decode(data.as_slice())))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(10))
      };
    targets=bench_codec);

criterion_main!(benches);
