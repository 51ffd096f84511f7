use crate::MonitorError;
use rtuscope_core::frame::MIN_FRAME_LEN;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;
use tracing::trace;

const DEFAULT_SILENCE: Duration = Duration::from_millis(200);
const DEFAULT_MAX_FRAME_LEN: usize = 1024;

#[derive(Debug, Clone, Copy)]
pub struct ReceiverConfig {
    /// Quiet time after the last byte that ends a candidate frame.
    pub silence: Duration,
    pub max_frame_len: usize,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            silence: DEFAULT_SILENCE,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }
}

impl ReceiverConfig {
    pub fn with_silence(mut self, silence: Duration) -> Self {
        self.silence = silence;
        self
    }

    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }
}

/// Splits a byte stream into candidate frames on inter-frame silence.
#[derive(Debug)]
pub struct FrameReceiver<IO> {
    io: IO,
    config: ReceiverConfig,
    buf: Vec<u8>,
}

impl<IO: AsyncRead + Unpin> FrameReceiver<IO> {
    pub fn new(io: IO, config: ReceiverConfig) -> Result<Self, MonitorError> {
        if config.max_frame_len < MIN_FRAME_LEN {
            return Err(MonitorError::InvalidConfig(
                "max frame length must be at least 4 bytes",
            ));
        }
        if config.silence.is_zero() {
            return Err(MonitorError::InvalidConfig("silence window must be non-zero"));
        }
        Ok(Self {
            io,
            buf: vec![0u8; config.max_frame_len],
            config,
        })
    }

    /// Waits for the next candidate frame. `Ok(None)` once the stream ends.
    pub async fn next_frame(&mut self) -> Result<Option<&[u8]>, MonitorError> {
        let len = self.fill().await?;
        if len == 0 {
            return Ok(None);
        }
        Ok(Some(&self.buf[..len]))
    }

    async fn fill(&mut self) -> Result<usize, MonitorError> {
        let max = self.config.max_frame_len;
        let mut len = 0usize;

        loop {
            if len == max {
                trace!(len, "frame buffer full, cutting frame");
                return Ok(len);
            }

            let read = self.io.read(&mut self.buf[len..max]);
            let n = if len == 0 {
                // Idle line: wait as long as it takes for the first byte.
                read.await?
            } else {
                match timeout(self.config.silence, read).await {
                    Ok(result) => result?,
                    Err(_) => {
                        trace!(len, "inter-frame silence, frame complete");
                        return Ok(len);
                    }
                }
            };

            if n == 0 {
                return Ok(len);
            }
            len += n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameReceiver, ReceiverConfig};
    use crate::MonitorError;
    use std::time::Duration;
    use tokio::io::{AsyncWriteExt, duplex};
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn splits_on_silence() {
        let (mut tx, rx) = duplex(64);
        let writer = tokio::spawn(async move {
            tx.write_all(&[0x01, 0x06, 0x00, 0x10]).await.unwrap();
            tx.write_all(&[0x00, 0x01, 0x49, 0xCF]).await.unwrap();
            sleep(Duration::from_millis(300)).await;
            tx.write_all(&[0x02, 0x03]).await.unwrap();
        });

        let mut receiver = FrameReceiver::new(rx, ReceiverConfig::default()).unwrap();
        assert_eq!(
            receiver.next_frame().await.unwrap(),
            Some(&[0x01, 0x06, 0x00, 0x10, 0x00, 0x01, 0x49, 0xCF][..])
        );
        assert_eq!(receiver.next_frame().await.unwrap(), Some(&[0x02, 0x03][..]));
        assert_eq!(receiver.next_frame().await.unwrap(), None);
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn cuts_frames_at_max_len() {
        let (mut tx, rx) = duplex(64);
        tx.write_all(&[1, 2, 3, 4, 5, 6]).await.unwrap();
        drop(tx);

        let config = ReceiverConfig::default().with_max_frame_len(4);
        let mut receiver = FrameReceiver::new(rx, config).unwrap();
        assert_eq!(receiver.next_frame().await.unwrap(), Some(&[1, 2, 3, 4][..]));
        assert_eq!(receiver.next_frame().await.unwrap(), Some(&[5, 6][..]));
        assert_eq!(receiver.next_frame().await.unwrap(), None);
    }

    #[test]
    fn rejects_invalid_config() {
        let (_tx, rx) = duplex(8);
        let config = ReceiverConfig::default().with_max_frame_len(3);
        assert!(matches!(
            FrameReceiver::new(rx, config),
            Err(MonitorError::InvalidConfig(_))
        ));

        let (_tx, rx) = duplex(8);
        let config = ReceiverConfig::default().with_silence(Duration::ZERO);
        assert!(matches!(
            FrameReceiver::new(rx, config),
            Err(MonitorError::InvalidConfig(_))
        ));
    }
}
