use clap::Parser;
use rtuscope_core::{FrameDecoder, SequencedOutcome};
use rtuscope_monitor::{FrameReceiver, Monitor, ReportSink, TracingSink, open_serial};
use rtuscope_tools::common::{AddressingArgs, SerialArgs, init_tracing};
use rtuscope_tools::render::render;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "rtumonitor", about = "Watch a serial line and decode Modbus RTU frames")]
struct Args {
    #[command(flatten)]
    serial: SerialArgs,
    #[command(flatten)]
    addressing: AddressingArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let stream = open_serial(&args.serial.port, &args.serial.serial_config())?;
    let receiver = FrameReceiver::new(stream, args.serial.receiver_config())?;
    let decoder = FrameDecoder::new(args.addressing.addressing());

    let sink = |raw: &[u8], outcome: &SequencedOutcome<'_>| {
        TracingSink.report(raw, outcome);
        println!("{}", render(raw, outcome));
    };

    info!(
        port = %args.serial.port,
        baud = args.serial.baud,
        local_address = args.addressing.local_address,
        "waiting for modbus rtu frames"
    );
    Monitor::new(receiver, decoder, sink).run().await?;
    Ok(())
}
