use hexraster::{
    hex::ReadError,
    naming::next_output_path,
    run::{self, ImageSink, RunError},
    Channels, DecodeConfig, Geometry, Ingest, OutputTarget, PixelFormat, PixelGrid,
    Rgb565ByteOrder,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hexraster-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

struct PngSink;

impl ImageSink for PngSink {
    type Error = image::ImageError;

    fn write(&mut self, grid: &PixelGrid, path: &Path) -> Result<(), Self::Error> {
        let samples = grid.samples().to_vec();
        match grid.channels() {
            Channels::Luma => image::GrayImage::from_vec(grid.width(), grid.height(), samples)
                .unwrap()
                .save(path),
            Channels::Rgb => image::RgbImage::from_vec(grid.width(), grid.height(), samples)
                .unwrap()
                .save(path),
        }
    }
}

/// Keeps the grid instead of writing it.
#[derive(Default)]
struct MemorySink(Vec<(PathBuf, PixelGrid)>);

impl ImageSink for MemorySink {
    type Error = std::io::Error;

    fn write(&mut self, grid: &PixelGrid, path: &Path) -> Result<(), Self::Error> {
        self.0.push((path.to_owned(), grid.clone()));
        Ok(())
    }
}

struct FailingSink;

impl ImageSink for FailingSink {
    type Error = std::io::Error;

    fn write(&mut self, _: &PixelGrid, _: &Path) -> Result<(), Self::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
    }
}

#[test]
fn numbering_starts_at_one() {
    let dir = scratch_dir("numbering-empty");
    let path = next_output_path(&dir, "output_grayscale_image", "png").unwrap();
    assert_eq!(path, dir.join("output_grayscale_image1.png"));
}

#[test]
fn numbering_continues_after_max() {
    let dir = scratch_dir("numbering-gaps");
    for name in [
        "output_grayscale_image1.png",
        "output_grayscale_image3.png",
        "output_grayscale_image5.png",
        "output_grayscale_image9.bmp",
        "unrelated12.png",
    ] {
        fs::write(dir.join(name), b"").unwrap();
    }

    let path = next_output_path(&dir, "output_grayscale_image", "png").unwrap();
    assert_eq!(path, dir.join("output_grayscale_image6.png"));
}

#[test]
fn numbering_creates_missing_dir() {
    let dir = scratch_dir("numbering-missing").join("nested");
    let path = next_output_path(&dir, "frame", "png").unwrap();
    assert!(dir.is_dir());
    assert_eq!(path, dir.join("frame1.png"));
}

#[test]
fn yuyv_rgb_to_png() {
    let dir = scratch_dir("yuyv-png");
    let source = dir.join("screenlog.0");
    fs::write(&source, "10 80 10 80\n4c 55 4c ff\n").unwrap();

    let config = DecodeConfig::new(
        &source,
        Geometry::new(2, 2).unwrap(),
        Ingest::Flat(PixelFormat::Yuyv422Rgb),
        OutputTarget::Path(dir.join("out.png")),
    );
    let written = run::run(&config, &mut PngSink).unwrap();
    assert!(written.shortfall.is_none());

    let image = image::open(&written.path).unwrap().into_rgb8();
    assert_eq!(image.dimensions(), (2, 2));
    assert_eq!(image.get_pixel(0, 0).0, [16, 16, 16]);
    assert_eq!(image.get_pixel(1, 1).0, hexraster::utils::yuv_to_rgb(0x4C, 0x55, 0xFF));
}

#[test]
fn gray_numbered_output() {
    let dir = scratch_dir("gray-numbered");
    let source = dir.join("screenlog.0");
    fs::write(&source, "20 80 40 80 60 80").unwrap();
    fs::write(dir.join("output_grayscale_image2.png"), b"").unwrap();

    let config = DecodeConfig {
        source_path: source,
        geometry: Geometry::new(2, 2).unwrap(),
        output: OutputTarget::Numbered {
            dir: dir.clone(),
            prefix: DecodeConfig::DEFAULT_PREFIX.to_owned(),
            extension: DecodeConfig::DEFAULT_EXTENSION.to_owned(),
        },
        ..DecodeConfig::default()
    };

    let mut sink = MemorySink::default();
    let written = run::run(&config, &mut sink).unwrap();

    let shortfall = written.shortfall.unwrap();
    assert_eq!((shortfall.required, shortfall.available), (8, 6));
    assert_eq!(written.path, dir.join("output_grayscale_image3.png"));

    let (path, grid) = &sink.0[0];
    assert_eq!(path, &written.path);
    assert_eq!(grid.samples(), [0x20, 0x40, 0x60, 0]);
}

#[test]
fn rgb565_little_endian() {
    let dir = scratch_dir("rgb565-le");
    let source = dir.join("dump.txt");
    fs::write(&source, "00 f8 e0 07").unwrap();

    let config = DecodeConfig::new(
        &source,
        Geometry::new(2, 1).unwrap(),
        Ingest::Flat(PixelFormat::Rgb565(Rgb565ByteOrder::LittleEndian)),
        OutputTarget::Path(dir.join("out.png")),
    );
    let decoded = run::decode_source(&config).unwrap();
    assert_eq!(decoded.grid.samples(), [255, 0, 0, 0, 255, 0]);
}

#[test]
fn lines_to_png() {
    let dir = scratch_dir("lines-png");
    let source = dir.join("rows.txt");
    fs::write(&source, "00 40 80 c0 ff\n10 20 30 40 50 60\n").unwrap();

    let config = DecodeConfig::new(
        &source,
        Geometry::new(4, 8).unwrap(),
        Ingest::Lines,
        OutputTarget::Path(dir.join("rows.png")),
    );
    let written = run::run(&config, &mut PngSink).unwrap();
    assert_eq!((written.width, written.height), (4, 2));

    let image = image::open(&written.path).unwrap().into_luma8();
    assert_eq!(image.into_raw(), [0x00, 0x40, 0x80, 0xC0, 0x10, 0x20, 0x30, 0x40]);
}

#[test]
fn ragged_lines_abort() {
    let dir = scratch_dir("lines-ragged");
    let source = dir.join("rows.txt");
    fs::write(&source, "00 40 80 c0\n10 20\n").unwrap();

    let config = DecodeConfig::new(
        &source,
        Geometry::new(4, 2).unwrap(),
        Ingest::Lines,
        OutputTarget::Path(dir.join("rows.png")),
    );
    let mut sink = MemorySink::default();
    let err = run::run(&config, &mut sink).unwrap_err();
    assert!(matches!(err, RunError::Lines { .. }));
    assert_eq!(err.to_string(), "row 1 has 2 values, expected 4");
    assert!(sink.0.is_empty());
}

#[test]
fn missing_source_is_reported() {
    let dir = scratch_dir("missing");
    let config = DecodeConfig {
        source_path: dir.join("nope.log"),
        output: OutputTarget::Path(dir.join("out.png")),
        ..DecodeConfig::default()
    };

    let err = run::run(&config, &mut MemorySink::default()).unwrap_err();
    assert!(matches!(
        err,
        RunError::Read {
            source: ReadError::SourceNotFound { .. }
        }
    ));
}

#[test]
fn bad_token_is_reported() {
    let dir = scratch_dir("bad-token");
    let source = dir.join("dump.txt");
    fs::write(&source, "00 11\n22 q3\n").unwrap();

    let config = DecodeConfig {
        source_path: source,
        output: OutputTarget::Path(dir.join("out.png")),
        ..DecodeConfig::default()
    };

    let err = run::run(&config, &mut MemorySink::default()).unwrap_err();
    assert_eq!(err.to_string(), "line 2: `q3` is not a hexadecimal byte");
}

#[test]
fn odd_width_rgb_is_rejected() {
    let config = DecodeConfig {
        geometry: Geometry::new(3, 1).unwrap(),
        ingest: Ingest::Flat(PixelFormat::Yuyv422Rgb),
        ..DecodeConfig::default()
    };

    let err = run::decode_source(&config).unwrap_err();
    assert!(matches!(err, RunError::OddWidth { width: 3 }));
}

#[test]
fn sink_failure_is_propagated() {
    let dir = scratch_dir("sink-failure");
    let source = dir.join("dump.txt");
    fs::write(&source, "00 00").unwrap();

    let config = DecodeConfig {
        source_path: source,
        geometry: Geometry::new(1, 1).unwrap(),
        output: OutputTarget::Path(dir.join("out.png")),
        ..DecodeConfig::default()
    };

    let err = run::run(&config, &mut FailingSink).unwrap_err();
    assert!(matches!(err, RunError::SinkWrite { .. }));
}
