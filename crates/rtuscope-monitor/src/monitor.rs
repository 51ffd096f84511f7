use crate::receiver::FrameReceiver;
use crate::sink::ReportSink;
use crate::MonitorError;
use rtuscope_core::{FrameCounter, FrameDecoder};
use std::sync::Arc;
use tokio::io::AsyncRead;
use tracing::debug;

/// Receives frames, decodes them in order and hands each outcome to a sink.
///
/// Several monitors on different transports may share one counter through
/// [`Monitor::with_counter`] to get a single sequence across all of them.
pub struct Monitor<IO, K> {
    receiver: FrameReceiver<IO>,
    decoder: FrameDecoder,
    counter: Arc<FrameCounter>,
    sink: K,
}

impl<IO: AsyncRead + Unpin, K: ReportSink> Monitor<IO, K> {
    pub fn new(receiver: FrameReceiver<IO>, decoder: FrameDecoder, sink: K) -> Self {
        Self {
            receiver,
            decoder,
            counter: Arc::new(FrameCounter::new()),
            sink,
        }
    }

    pub fn with_counter(mut self, counter: Arc<FrameCounter>) -> Self {
        self.counter = counter;
        self
    }

    pub fn counter(&self) -> &Arc<FrameCounter> {
        &self.counter
    }

    /// Handles one frame. Returns `false` once the stream has ended.
    pub async fn process_next(&mut self) -> Result<bool, MonitorError> {
        let Some(frame) = self.receiver.next_frame().await? else {
            return Ok(false);
        };
        let outcome = self.decoder.decode_sequenced(&self.counter, frame);
        self.sink.report(frame, &outcome);
        Ok(true)
    }

    /// Runs until the stream ends. Decode failures never stop the loop.
    pub async fn run(&mut self) -> Result<(), MonitorError> {
        while self.process_next().await? {}
        debug!(frames = self.counter.current(), "monitor reached end of stream");
        Ok(())
    }
}
