use argh::FromArgs;
use hexraster::{
    run::{self, ImageSink},
    Channels, DecodeConfig, Geometry, Ingest, OutputTarget, PixelFormat, PixelGrid,
    Rgb565ByteOrder,
};
use image::{GrayImage, RgbImage};
use log::error;
use std::{path::Path, process::ExitCode, str::FromStr};

/// Decodes hex-dumped camera frames into images.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Decode(Decode),
    DecodeLines(DecodeLines),
}

/// Decodes a whitespace-separated hex dump of a whole frame.
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct Decode {
    /// source pixel layout (yuyv-rgb, yuyv-gray, rgb565)
    #[argh(option, default = "Format::YuyvGray")]
    format: Format,

    /// byte order of RGB565 words (be, le)
    #[argh(option, default = "ByteOrder::Be")]
    byte_order: ByteOrder,

    /// the hex dump to decode (default: screenlog.0)
    #[argh(positional)]
    input: Option<String>,

    /// image width in pixels
    #[argh(option, default = "DecodeConfig::DEFAULT_GEOMETRY.width.get()")]
    width: u32,
    /// image height in pixels
    #[argh(option, default = "DecodeConfig::DEFAULT_GEOMETRY.height.get()")]
    height: u32,

    /// the output file. If not set, a numbered file is created instead.
    #[argh(option, short = 'o')]
    output: Option<String>,
    /// prefix of numbered output files
    #[argh(option, default = "DecodeConfig::DEFAULT_PREFIX.to_owned()")]
    prefix: String,
    /// directory of numbered output files
    #[argh(option, default = "String::from(\".\")")]
    dir: String,
}

/// Decodes a hex dump where every line holds one row of luma values.
#[derive(FromArgs)]
#[argh(subcommand, name = "decode-lines")]
struct DecodeLines {
    /// the hex dump to decode (default: screenlog.0)
    #[argh(positional)]
    input: Option<String>,

    /// image width in pixels
    #[argh(option, default = "DecodeConfig::DEFAULT_GEOMETRY.width.get()")]
    width: u32,
    /// maximum image height in pixels
    #[argh(option, default = "DecodeConfig::DEFAULT_GEOMETRY.height.get()")]
    height: u32,

    /// the output file. If not set, a numbered file is created instead.
    #[argh(option, short = 'o')]
    output: Option<String>,
    /// prefix of numbered output files
    #[argh(option, default = "DecodeConfig::DEFAULT_PREFIX.to_owned()")]
    prefix: String,
    /// directory of numbered output files
    #[argh(option, default = "String::from(\".\")")]
    dir: String,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    YuyvRgb,
    YuyvGray,
    Rgb565,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(format) = s.eq_ignore_ascii_case("yuyv-rgb").then_some(Format::YuyvRgb)
               .or_else(|| s.eq_ignore_ascii_case("yuyv-gray").then_some(Format::YuyvGray))
               .or_else(|| s.eq_ignore_ascii_case("rgb565").then_some(Format::Rgb565))
        else { return Err("expected one of yuyv-rgb, yuyv-gray, rgb565"); };

        Ok(format)
    }
}

#[derive(Debug, Clone, Copy)]
enum ByteOrder {
    Be,
    Le,
}

impl FromStr for ByteOrder {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(order) = s.eq_ignore_ascii_case("be").then_some(ByteOrder::Be)
               .or_else(|| s.eq_ignore_ascii_case("le").then_some(ByteOrder::Le))
        else { return Err("expected be or le"); };

        Ok(order)
    }
}

/// Writes grids with the `image` crate, picking the encoder from the file extension.
struct ImageFileSink;

impl ImageSink for ImageFileSink {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn write(&mut self, grid: &PixelGrid, path: &Path) -> Result<(), Self::Error> {
        let (width, height) = (grid.width(), grid.height());
        let samples = grid.samples().to_vec();

        match grid.channels() {
            Channels::Luma => GrayImage::from_vec(width, height, samples)
                .ok_or("failed to create image")?
                .save(path)?,
            Channels::Rgb => RgbImage::from_vec(width, height, samples)
                .ok_or("failed to create image")?
                .save(path)?,
        }

        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Cli { command } = argh::from_env();

    match decode(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn decode(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let config = match command {
        Command::Decode(options) => decode_config(options)?,
        Command::DecodeLines(options) => decode_lines_config(options)?,
    };

    println!("Decoding `{}`", config.source_path.display());

    let written = run::run(&config, &mut ImageFileSink)?;

    println!(
        "Written {}x{} image to `{}`",
        written.width,
        written.height,
        written.path.display()
    );

    Ok(())
}

fn geometry(width: u32, height: u32) -> Result<Geometry, Box<dyn std::error::Error>> {
    Geometry::new(width, height).ok_or_else(|| "width and height must be non-zero".into())
}

fn output_target(output: Option<String>, prefix: String, dir: String) -> OutputTarget {
    match output {
        Some(path) => OutputTarget::Path(path.into()),
        None => OutputTarget::Numbered {
            dir: dir.into(),
            prefix,
            extension: DecodeConfig::DEFAULT_EXTENSION.to_owned(),
        },
    }
}

fn decode_config(options: Decode) -> Result<DecodeConfig, Box<dyn std::error::Error>> {
    let Decode {
        format,
        byte_order,
        input,
        width,
        height,
        output,
        prefix,
        dir,
    } = options;

    let format = match format {
        Format::YuyvRgb => PixelFormat::Yuyv422Rgb,
        Format::YuyvGray => PixelFormat::Yuyv422Gray,
        Format::Rgb565 => PixelFormat::Rgb565(match byte_order {
            ByteOrder::Be => Rgb565ByteOrder::BigEndian,
            ByteOrder::Le => Rgb565ByteOrder::LittleEndian,
        }),
    };

    Ok(DecodeConfig::new(
        input.as_deref().unwrap_or(DecodeConfig::DEFAULT_SOURCE),
        geometry(width, height)?,
        Ingest::Flat(format),
        output_target(output, prefix, dir),
    ))
}

fn decode_lines_config(options: DecodeLines) -> Result<DecodeConfig, Box<dyn std::error::Error>> {
    let DecodeLines {
        input,
        width,
        height,
        output,
        prefix,
        dir,
    } = options;

    Ok(DecodeConfig::new(
        input.as_deref().unwrap_or(DecodeConfig::DEFAULT_SOURCE),
        geometry(width, height)?,
        Ingest::Lines,
        output_target(output, prefix, dir),
    ))
}
