use clap::Parser;
use rtuscope_core::{FrameCounter, FrameDecoder};
use rtuscope_tools::common::{AddressingArgs, init_tracing, parse_hex_frame};
use rtuscope_tools::render::render;

#[derive(Debug, Parser)]
#[command(name = "rtudecode", about = "Decode Modbus RTU frames given as hex")]
struct Args {
    #[command(flatten)]
    addressing: AddressingArgs,
    /// One hex string per frame, e.g. "01 06 00 10 00 01 49 CF".
    #[arg(required = true)]
    frames: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    let decoder = FrameDecoder::new(args.addressing.addressing());
    let counter = FrameCounter::new();

    for input in &args.frames {
        let frame = parse_hex_frame(input)?;
        let outcome = decoder.decode_sequenced(&counter, &frame);
        println!("{}", render(&frame, &outcome));
    }
    Ok(())
}
