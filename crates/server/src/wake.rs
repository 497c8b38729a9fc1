// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wake-on-LAN frame delivery.
//!
//! The packet layout comes from the core crate; this module only owns the
//! UDP send. Delivery is best-effort: the caller reports a failure in the
//! response but never fails the request over it.

use campus_roll::{WAKE_PORT, magic_packet};
use campus_roll_domain::MacAddress;
use tokio::net::UdpSocket;

/// Broadcasts a Wake-on-LAN magic packet for the given hardware address.
///
/// # Arguments
///
/// * `mac` - The target hardware address
/// * `broadcast` - The broadcast address to send to (e.g. `255.255.255.255`)
///
/// # Errors
///
/// Returns an error if the socket cannot be created or the send fails.
pub async fn send_magic_packet(mac: MacAddress, broadcast: &str) -> std::io::Result<()> {
    let socket: UdpSocket = UdpSocket::bind(("0.0.0.0", 0)).await?;
    socket.set_broadcast(true)?;

    let packet = magic_packet(mac);
    socket.send_to(&packet, (broadcast, WAKE_PORT)).await?;

    Ok(())
}
