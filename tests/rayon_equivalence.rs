#![cfg(feature = "rayon")]

use patchscale::{OwnedImage, UpscaleConfig, Upscaler};

fn make_image(width: usize, height: usize) -> OwnedImage {
    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let v = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
                [v as u8, (v * 7 & 0xFF) as u8, (255 - v) as u8]
            })
        })
        .collect();
    OwnedImage::new(data, width, height).unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let img = make_image(40, 33);
    let base = UpscaleConfig {
        context_diameter: 5,
        top_k: 3,
        area_size: 10,
        scale: 2,
        color_preservation: 0.7,
        stop_threshold: 120,
        ..UpscaleConfig::default()
    };
    let seq = Upscaler::new(UpscaleConfig {
        parallel: false,
        ..base.clone()
    })
    .unwrap()
    .upscale(img.view())
    .unwrap();
    let par = Upscaler::new(UpscaleConfig {
        parallel: true,
        ..base
    })
    .unwrap()
    .upscale(img.view())
    .unwrap();

    assert_eq!(seq, par);
}

#[test]
fn thread_count_does_not_change_output() {
    let img = make_image(31, 27);
    let upscaler = Upscaler::new(UpscaleConfig {
        context_diameter: 3,
        top_k: 2,
        scale: 3,
        ..UpscaleConfig::default()
    })
    .unwrap();

    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| upscaler.upscale(img.view()).unwrap())
    };
    assert_eq!(run(1), run(4));
}
