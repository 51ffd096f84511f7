pub mod rtu;

pub use rtu::{MAX_FRAME_LEN, MIN_FRAME_LEN, ValidatedFrame, encode_frame, validate};
