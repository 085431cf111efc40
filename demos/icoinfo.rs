use clap::{App, Arg, SubCommand};
use std::fs;
use std::path::PathBuf;

//===========================================================================//

fn main() {
    let matches = App::new("icoinfo")
        .version("0.1")
        .about("Inspects and extracts frames from ICO/CUR files")
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists the frames in an ICO/CUR file")
                .arg(Arg::with_name("ico").required(true)),
        )
        .subcommand(
            SubCommand::with_name("extract")
                .about("Extracts one frame from an ICO/CUR file as a PNG")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(Arg::with_name("ico").required(true))
                .arg(Arg::with_name("index").required(true)),
        )
        .get_matches();
    if let Some(submatches) = matches.subcommand_matches("list") {
        let path = submatches.value_of("ico").unwrap();
        let bytes = fs::read(path).unwrap();
        let info = icodec::identify_from_memory(&bytes).unwrap();
        println!("Resource type: {:?}", info.resource_type());
        println!("Canvas: {}x{}", info.width(), info.height());
        for (index, frame) in info.frames().iter().enumerate() {
            let kind = match frame.metadata().kind() {
                icodec::FrameKind::Png => "PNG",
                icodec::FrameKind::Bmp => "BMP",
            };
            let suffix =
                if let Some((x, y)) = frame.metadata().cursor_hotspot() {
                    format!("hotspot at ({}, {})", x, y)
                } else {
                    format!("{} bpp", frame.metadata().bits_per_pixel())
                };
            println!(
                "{:5}: {}x{} {}, {}",
                index,
                frame.width(),
                frame.height(),
                kind,
                suffix
            );
        }
    } else if let Some(submatches) = matches.subcommand_matches("extract") {
        let path = submatches.value_of("ico").unwrap();
        let bytes = fs::read(path).unwrap();
        let image = icodec::decode_from_memory(&bytes).unwrap();
        let index = submatches.value_of("index").unwrap();
        let index = index.parse::<usize>().unwrap();
        let frame = &image.frames()[index];
        let out_path = if let Some(path) = submatches.value_of("output") {
            PathBuf::from(path)
        } else {
            PathBuf::from(format!("{}.{}.png", path, index))
        };
        let out_file = fs::File::create(out_path).unwrap();
        let mut encoder =
            png::Encoder::new(out_file, frame.width(), frame.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(frame.rgba_data()).unwrap();
    }
}

//===========================================================================//
