use rtuscope_core::{DecodeOutcome, SequencedOutcome};
use tracing::{debug, info, warn};

/// Consumer of decode results. Rendering lives behind this trait.
pub trait ReportSink {
    fn report(&self, raw: &[u8], outcome: &SequencedOutcome<'_>);
}

impl<F> ReportSink for F
where
    F: Fn(&[u8], &SequencedOutcome<'_>),
{
    fn report(&self, raw: &[u8], outcome: &SequencedOutcome<'_>) {
        self(raw, outcome)
    }
}

/// Logs every outcome as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, raw: &[u8], outcome: &SequencedOutcome<'_>) {
        let sequence = outcome.sequence;
        match outcome.outcome {
            DecodeOutcome::RejectedTooShort { len } => {
                warn!(sequence, len, "frame rejected: too short");
            }
            DecodeOutcome::RejectedCrcMismatch { received, computed } => {
                warn!(
                    sequence,
                    len = raw.len(),
                    received = format_args!("0x{received:04X}"),
                    computed = format_args!("0x{computed:04X}"),
                    "frame rejected: crc mismatch"
                );
            }
            DecodeOutcome::FilteredOtherAddress { slave_id } => {
                debug!(sequence, slave_id, "frame for another slave ignored");
            }
            DecodeOutcome::Accepted(frame) => {
                info!(
                    sequence,
                    slave_id = frame.slave_id,
                    address = ?frame.address_class,
                    function = frame.function.name(),
                    fields = ?frame.function.fields,
                    "frame accepted"
                );
            }
        }
    }
}
