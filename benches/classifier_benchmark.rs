use agrisense::classifier::{argmax, decode_image, preprocess};
use agrisense::defects::resolve;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use std::io::Cursor;

fn leaf_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, 150, (y % 256) as u8])
    }))
}

fn bench_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("Preprocess");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    for (name, (w, h)) in [("small_256", (256, 256)), ("phone_photo_1920", (1920, 1080))] {
        let image = leaf_image(w, h);
        group.bench_function(name, |b| b.iter(|| preprocess(black_box(&image))));
    }

    let mut png = Vec::new();
    leaf_image(640, 480)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    group.bench_function("decode_and_preprocess_png_640", |b| {
        b.iter(|| preprocess(&decode_image(black_box(&png)).unwrap()))
    });

    group.finish();
}

fn bench_postprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("Postprocess");

    let scores: Vec<f32> = (0..38).map(|i| (i as f32 * 0.37).sin().abs()).collect();
    group.bench_function("argmax_38_classes", |b| b.iter(|| argmax(black_box(&scores))));

    group.bench_function("resolve_match", |b| {
        b.iter(|| resolve(black_box("Tomato_Septoria_leaf_spot")))
    });
    group.bench_function("resolve_fallback", |b| {
        b.iter(|| resolve(black_box("Squash___Powdery_mildew")))
    });

    group.finish();
}

criterion_group!(benches, bench_preprocess, bench_postprocess);
criterion_main!(benches);
