//Ethernet Frame Layer (OSI Layer 2), TX path
//
//Composes Ethernet II frames directly inside hardware-owned buffers and
//hands them to the egress queue.
//Frame structure: [Dest MAC (6)][Src MAC (6)][EtherType (2)][Payload]
//The trailing FCS is appended by the hardware, not by this layer.

use log::debug;

use crate::drivers::net::{EgressDescriptor, NicTx, TransmitError};
use crate::net::cursor::{BufferCursor, WireHeader};
use crate::net::endian::NetU16;

/// EtherType constants (host order; tag with `NetU16::new` when sending)
pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;
pub const ETHERTYPE_IPV6: u16 = 0x86DD;

/// Broadcast MAC address (FF:FF:FF:FF:FF:FF)
pub const BROADCAST_MAC: [u8; 6] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

/// Maximum Ethernet payload size (MTU)
pub const MAX_PAYLOAD_SIZE: usize = 1500;

/// Ethernet frame header size (excluding FCS)
pub const HEADER_SIZE: usize = 14;

/// Wire-format Ethernet II header, laid directly into the packet buffer.
#[repr(C, packed)]
pub struct EthernetHeader {
    pub dest_mac: [u8; 6],
    pub src_mac: [u8; 6],
    pub ethertype: NetU16,
}

unsafe impl WireHeader for EthernetHeader {}

const _: () = assert!(core::mem::size_of::<EthernetHeader>() == HEADER_SIZE);

/// Check if a destination address is the broadcast address
pub fn is_broadcast(mac: &[u8; 6]) -> bool {
    *mac == BROADCAST_MAC
}

/// Check if a destination address is multicast
pub fn is_multicast(mac: &[u8; 6]) -> bool {
    (mac[0] & 0x01) != 0 && !is_broadcast(mac)
}

/// Check if a destination address is unicast
pub fn is_unicast(mac: &[u8; 6]) -> bool {
    !is_broadcast(mac) && !is_multicast(mac)
}

/// Compose one Ethernet frame in a hardware buffer and submit it to the
/// egress queue.
///
/// The source address comes from the NIC's link configuration; `dest_mac`
/// and the payload bytes are emitted verbatim. `payload_writer` receives a
/// cursor positioned immediately after the header and must write exactly
/// `payload_size` bytes.
///
/// On success the frame has been handed to hardware, fire-and-forget; the
/// buffer is released by the hardware after transmission and must not be
/// touched again. On allocation failure the error propagates before any
/// byte is written, so no partial frame is ever submitted.
pub fn send_frame<F>(
    nic: &dyn NicTx,
    payload_size: usize,
    dest_mac: [u8; 6],
    ethertype: NetU16,
    payload_writer: F,
) -> Result<(), TransmitError>
where
    F: FnOnce(BufferCursor<'_>),
{
    if payload_size > MAX_PAYLOAD_SIZE {
        return Err(TransmitError::PayloadTooLarge);
    }

    let frame_size = HEADER_SIZE + payload_size;

    debug!(
        "[ETH] sending {} byte frame to {:02x?} with type {:#06x}",
        frame_size,
        dest_mac,
        ethertype.host()
    );

    let mut buf = nic.alloc_buffer(frame_size)?;
    let src_mac = nic.link_addr();

    let cursor = write_header(BufferCursor::new(buf.as_mut_slice()), dest_mac, src_mac, ethertype);
    payload_writer(cursor);

    nic.submit(EgressDescriptor {
        xfer_size: frame_size,
        bounded: true,
        auto_release: true,
        buf,
    });

    Ok(())
}

/// Writes the Ethernet header after the given buffer cursor.
///
/// `dest_mac` is copied verbatim and `ethertype` is already tagged, so no
/// per-field conversion happens here.
fn write_header(
    cursor: BufferCursor<'_>,
    dest_mac: [u8; 6],
    src_mac: [u8; 6],
    ethertype: NetU16,
) -> BufferCursor<'_> {
    cursor.write_with::<EthernetHeader, _>(|hdr| {
        hdr.dest_mac = dest_mac;
        hdr.src_mac = src_mac;
        hdr.ethertype = ethertype;
    })
}
