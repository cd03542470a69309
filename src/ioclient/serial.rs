//! Serial transport: port configuration and the 0xAA .. 0x55 frame scanner.
use crate::error::TransportError;
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, SerialStream, StopBits};

/// WaveShare adapters run at 2 Mbaud, 8N1.
const BAUD_RATE: u32 = 2_000_000;

/// Open and configure the serial port.
pub(super) fn open(path: &str) -> Result<SerialStream, TransportError> {
    let stream = tokio_serial::new(path, BAUD_RATE)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .open_native_async()?;
    Ok(stream)
}

/// Pull complete `0xAA .. 0x55` windows out of the accumulation buffer,
/// dropping any noise in front of the start sentinel. Incomplete frames stay
/// buffered until more bytes arrive.
pub(super) fn extract_frames(buffer: &mut Vec<u8>) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    loop {
        let Some(start) = buffer.iter().position(|b| *b == 0xAA) else {
            buffer.clear();
            break;
        };
        let Some(end) = buffer[start..].iter().position(|b| *b == 0x55) else {
            // Wait for the rest of the frame; forget the leading noise.
            buffer.drain(..start);
            break;
        };
        let frame = buffer[start..start + end + 1].to_vec();
        buffer.drain(..start + end + 1);
        frames.push(frame);
    }
    frames
}
