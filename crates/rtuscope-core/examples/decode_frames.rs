use rtuscope_core::encoding::Writer;
use rtuscope_core::frame;
use rtuscope_core::{DecodeOutcome, FrameCounter, FrameDecoder};

fn main() {
    let mut buf = [0u8; 16];
    let mut w = Writer::new(&mut buf);
    frame::encode_frame(&mut w, 0x01, &[0x06, 0x00, 0x10, 0x00, 0x01])
        .expect("frame encoding should succeed for valid sample data");
    println!("encoded frame: {:02X?}", w.as_written());

    let decoder = FrameDecoder::default();
    let counter = FrameCounter::new();
    let samples: [&[u8]; 3] = [
        w.as_written(),
        &[0x01, 0x06, 0x00, 0x10, 0x00, 0x01, 0xFF, 0xFF],
        &[0x99, 0x06],
    ];

    for sample in samples {
        let result = decoder.decode_sequenced(&counter, sample);
        match result.outcome {
            DecodeOutcome::Accepted(decoded) => println!(
                "frame #{}: {} {:?}",
                result.sequence,
                decoded.function.name(),
                decoded.function.fields
            ),
            other => println!("frame #{}: {other:?}", result.sequence),
        }
    }
}
