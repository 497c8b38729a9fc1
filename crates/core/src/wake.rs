// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_roll_domain::MacAddress;

/// The UDP port Wake-on-LAN frames are broadcast to.
pub const WAKE_PORT: u16 = 9;

/// The size of a magic packet: a six-byte sync stream followed by sixteen
/// repetitions of the target address.
pub const MAGIC_PACKET_LEN: usize = 6 + 16 * 6;

/// Builds the Wake-on-LAN magic packet for a hardware address.
#[must_use]
pub fn magic_packet(mac: MacAddress) -> [u8; MAGIC_PACKET_LEN] {
    let octets: [u8; 6] = mac.octets();
    let mut packet: [u8; MAGIC_PACKET_LEN] = [0xff; MAGIC_PACKET_LEN];
    for repetition in 0..16 {
        let start: usize = 6 + repetition * 6;
        packet[start..start + 6].copy_from_slice(&octets);
    }
    packet
}
