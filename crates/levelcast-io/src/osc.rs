//! OSC parameter sink.

use std::net::{SocketAddr, UdpSocket};

use levelcast_core::{ParameterSink, Slot};
use rosc::{OscMessage, OscPacket, OscType};

use crate::Result;

/// Sends every publication as a single-float OSC message over UDP.
///
/// The address of a slot is `prefix + parameter_name`, for example
/// `/avatar/parameters/VRCOSC/Voicemeeter/Bus/A1/Level`. One message per
/// slot is built up front and only its argument changes per publication.
/// Sends are fire-and-forget: failures are counted and logged, never
/// returned.
#[derive(Debug)]
pub struct OscSink {
    socket: UdpSocket,
    target: SocketAddr,
    packets: Vec<OscPacket>,
    sent: u64,
    failures: u64,
}

impl OscSink {
    /// Binds an ephemeral local socket for sending to `target`.
    pub fn new(target: SocketAddr, prefix: &str) -> Result<Self> {
        let bind: SocketAddr = if target.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(bind)?;
        let packets = Slot::all()
            .map(|slot| {
                OscPacket::Message(OscMessage {
                    addr: osc_address(prefix, slot),
                    args: vec![OscType::Float(0.0)],
                })
            })
            .collect();

        tracing::info!(%target, "sending parameters over OSC");
        Ok(Self {
            socket,
            target,
            packets,
            sent: 0,
            failures: 0,
        })
    }

    /// Destination address.
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Full OSC address for a slot.
    pub fn address(&self, slot: Slot) -> &str {
        match &self.packets[slot.index()] {
            OscPacket::Message(msg) => &msg.addr,
            OscPacket::Bundle(_) => "",
        }
    }

    /// Messages sent successfully.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Messages that failed to encode or send.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    fn send(&mut self, slot: Slot, value: f32) -> Result<()> {
        let packet = &mut self.packets[slot.index()];
        if let OscPacket::Message(msg) = &mut *packet {
            msg.args[0] = OscType::Float(value);
        }
        let buf = rosc::encoder::encode(packet)?;
        self.socket.send_to(&buf, self.target)?;
        Ok(())
    }
}

impl ParameterSink for OscSink {
    fn publish(&mut self, slot: Slot, value: f32) {
        match self.send(slot, value) {
            Ok(()) => self.sent += 1,
            Err(e) => {
                self.failures += 1;
                tracing::debug!(%slot, error = %e, failures = self.failures, "OSC send failed");
            }
        }
    }
}

/// Joins an address prefix and a slot parameter name.
///
/// A missing or doubled `/` between the two is normalized.
pub fn osc_address(prefix: &str, slot: Slot) -> String {
    let prefix = prefix.trim_end_matches('/');
    format!("{prefix}/{}", slot.parameter_name())
}
