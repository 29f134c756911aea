/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs;
use std::path::Path;

use grd::{GrdContainer, GrdGeometry, PixelDepth};
use grd_bin::cmd_parsers::global_options::{CmdOptions, Mode};
use grd_bin::errors::GrdToolErrors;
use grd_bin::file_io::{read_png, write_png};
use grd_bin::workflow::{collect_files, run_workflow};
use grd_core::colorspace::ColorSpace;

fn gradient(width: usize, height: usize, components: usize) -> Vec<u8> {
    (0..width * height * components).map(|i| (i * 7 % 256) as u8).collect()
}

fn header_geometry(path: &Path) -> (GrdGeometry, PixelDepth) {
    let data = fs::read(path).unwrap();
    let container = GrdContainer::parse(&data, true).unwrap();
    (container.header().geometry, container.header().depth)
}

#[test]
fn create_then_extract_and_decode() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("title.png");
    let pixels = gradient(5, 3, 4);
    write_png(&png, &pixels, 5, 3, ColorSpace::RGBA).unwrap();

    run_workflow(&CmdOptions::new(Mode::Create, png)).unwrap();

    let grd = dir.path().join("title.new.grd");
    let (geometry, depth) = header_geometry(&grd);
    assert_eq!(geometry, GrdGeometry::full_image(5, 3).unwrap());
    assert_eq!(depth, PixelDepth::Argb32);

    let mut options = CmdOptions::new(Mode::Extract, grd);
    options.decode = true;
    run_workflow(&options).unwrap();

    let json = fs::read_to_string(dir.path().join("title.new.metadata.json")).unwrap();
    assert!(json.contains("\"Bpp\": 32"));
    assert!(json.contains("\"Right\": 5"));

    let decoded = read_png(&dir.path().join("title.new.png")).unwrap();
    assert_eq!(decoded.colorspace, ColorSpace::RGBA);
    assert_eq!(decoded.pixels, pixels);
}

#[test]
fn sidecar_geometry_is_used_but_not_its_depth() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("bg.png");
    write_png(&png, &gradient(4, 2, 3), 4, 2, ColorSpace::RGB).unwrap();

    fs::write(
        dir.path().join("bg.metadata.json"),
        r#"{
  "ScreenWidth": 800,
  "ScreenHeight": 600,
  "Bpp": 32,
  "Left": 100,
  "Right": 104,
  "Top": 40,
  "Bottom": 42
}"#
    )
    .unwrap();

    run_workflow(&CmdOptions::new(Mode::Create, png)).unwrap();

    let (geometry, depth) = header_geometry(&dir.path().join("bg.new.grd"));
    assert_eq!(depth, PixelDepth::Rgb24);
    assert_eq!(
        geometry,
        GrdGeometry {
            screen_width:  800,
            screen_height: 600,
            left:          100,
            right:         104,
            top:           40,
            bottom:        42
        }
    );
}

#[test]
fn malformed_sidecar_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("char.png");
    write_png(&png, &gradient(3, 7, 4), 3, 7, ColorSpace::RGBA).unwrap();
    fs::write(dir.path().join("char.metadata.json"), "{ \"Left\": ").unwrap();

    run_workflow(&CmdOptions::new(Mode::Create, png)).unwrap();

    let (geometry, _) = header_geometry(&dir.path().join("char.new.grd"));
    assert_eq!(geometry, GrdGeometry::full_image(3, 7).unwrap());
}

#[test]
fn folder_batch_continues_after_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("b.PNG"), &gradient(2, 2, 3), 2, 2, ColorSpace::RGB).unwrap();
    write_png(&dir.path().join("c.png"), &gradient(2, 2, 4), 2, 2, ColorSpace::RGBA).unwrap();
    fs::write(dir.path().join("a.png"), b"definitely not a png").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let files = collect_files(dir.path(), "png").unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|file| file.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.png", "b.PNG", "c.png"]);

    let result = run_workflow(&CmdOptions::new(Mode::Create, dir.path().to_path_buf()));
    assert!(matches!(result, Err(GrdToolErrors::BatchFailures(1, 3))));

    assert!(!dir.path().join("a.new.grd").exists());
    assert!(dir.path().join("b.new.grd").exists());
    assert!(dir.path().join("c.new.grd").exists());

    // the created containers are picked up by an extract batch
    run_workflow(&CmdOptions::new(Mode::Extract, dir.path().to_path_buf())).unwrap();
    assert!(dir.path().join("b.new.metadata.json").exists());
    assert!(dir.path().join("c.new.metadata.json").exists());
}

#[test]
fn truncated_container_still_extracts_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("cut.png");
    write_png(&png, &gradient(6, 6, 3), 6, 6, ColorSpace::RGB).unwrap();
    run_workflow(&CmdOptions::new(Mode::Create, png)).unwrap();

    let grd = dir.path().join("cut.new.grd");
    let data = fs::read(&grd).unwrap();
    fs::write(&grd, &data[..data.len() - 4]).unwrap();

    run_workflow(&CmdOptions::new(Mode::Extract, grd.clone())).unwrap();
    assert!(dir.path().join("cut.new.metadata.json").exists());

    let mut options = CmdOptions::new(Mode::Extract, grd);
    options.decode = true;
    assert!(matches!(
        run_workflow(&options),
        Err(GrdToolErrors::GrdDecodeErrors(_))
    ));
}

#[test]
fn unusable_crop_box_still_extracts_metadata() {
    let dir = tempfile::tempdir().unwrap();

    for name in ["good", "inverted", "wide"] {
        let png = dir.path().join(format!("{name}.png"));
        write_png(&png, &gradient(4, 4, 3), 4, 4, ColorSpace::RGB).unwrap();
        run_workflow(&CmdOptions::new(Mode::Create, png)).unwrap();
    }
    let patch = |name: &str, offset: usize, value: u16| {
        let grd = dir.path().join(format!("{name}.new.grd"));
        let mut data = fs::read(&grd).unwrap();
        data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        fs::write(&grd, data).unwrap();
    };
    // left = 10 > right = 5
    patch("inverted", 8, 10);
    patch("inverted", 10, 5);
    // wider than the default limit
    patch("wide", 10, 20000);

    run_workflow(&CmdOptions::new(Mode::Extract, dir.path().to_path_buf())).unwrap();

    let inverted = fs::read_to_string(dir.path().join("inverted.new.metadata.json")).unwrap();
    assert!(inverted.contains("\"Left\": 10"));
    assert!(inverted.contains("\"Right\": 5"));

    let wide = fs::read_to_string(dir.path().join("wide.new.metadata.json")).unwrap();
    assert!(wide.contains("\"Right\": 20000"));

    let mut options = CmdOptions::new(Mode::Extract, dir.path().to_path_buf());
    options.decode = true;
    assert!(matches!(
        run_workflow(&options),
        Err(GrdToolErrors::BatchFailures(2, 3))
    ));
    assert!(dir.path().join("good.new.png").exists());
    assert!(!dir.path().join("inverted.new.png").exists());
    assert!(!dir.path().join("wide.new.png").exists());
}

#[test]
fn missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let options = CmdOptions::new(Mode::Create, dir.path().join("nope"));

    assert!(matches!(
        run_workflow(&options),
        Err(GrdToolErrors::InvalidPath(_))
    ));
}
