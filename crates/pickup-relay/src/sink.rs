//! Display sink: the downstream video wall that renders text and opacity.
//!
//! Fire-and-forget: the wall never acknowledges, and a sink fault must
//! never stall the message lifecycle, so errors are logged and swallowed
//! inside the implementation.

use std::net::UdpSocket;

use anyhow::Result;
use tracing::{debug, warn};

use crate::osc;

/// The public display. One text parameter, one opacity parameter, pushed
/// independently with no transaction.
pub trait DisplaySink: Send + Sync {
    fn show(&self, text: &str, opacity: f32);

    /// Blank the display: empty text, zero opacity.
    fn blank(&self) {
        self.show("", 0.0);
    }
}

/// OSC-over-UDP sink for the video wall.
pub struct OscSink {
    socket: UdpSocket,
    text_address: String,
    opacity_address: String,
}

impl OscSink {
    /// Bind an ephemeral local port and connect it to the wall's OSC port.
    pub fn connect(target: &str, text_address: &str, opacity_address: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(target)?;
        Ok(Self {
            socket,
            text_address: text_address.to_string(),
            opacity_address: opacity_address.to_string(),
        })
    }
}

impl DisplaySink for OscSink {
    fn show(&self, text: &str, opacity: f32) {
        let text_msg = osc::string_message(&self.text_address, text);
        let opacity_msg = osc::float_message(&self.opacity_address, opacity);

        for datagram in [&text_msg, &opacity_msg] {
            if let Err(e) = self.socket.send(datagram) {
                warn!("OSC send failed: {}", e);
                return;
            }
        }
        debug!("Sent OSC text {:?} at opacity {}", text, opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc_sink_delivers_both_parameters() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(std::time::Duration::from_secs(2)))
            .unwrap();
        let target = receiver.local_addr().unwrap().to_string();

        let sink = OscSink::connect(&target, "/layer/text", "/layer/opacity").unwrap();
        sink.show("Max", 1.0);

        let mut buf = [0u8; 256];
        let n = receiver.recv(&mut buf).unwrap();
        assert!(buf[..n].starts_with(b"/layer/text"));
        let n = receiver.recv(&mut buf).unwrap();
        assert!(buf[..n].starts_with(b"/layer/opacity"));
    }
}
