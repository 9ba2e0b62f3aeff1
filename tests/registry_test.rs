use std::sync::Arc;

use txframe::drivers::net::{self, LoopbackNic, TransmitError};
use txframe::net::endian::NetU16;
use txframe::net::ethernet::{ETHERTYPE_IPV4, HEADER_SIZE};

const MAC: [u8; 6] = [0x52, 0x54, 0x00, 0x12, 0x34, 0x56];

// The registry is process-global, so its whole lifecycle lives in one test.
#[test]
fn test_registry_lifecycle() {
    assert!(!net::has_network_device());
    assert_eq!(net::get_link_addr(), None);

    let result = net::transmit_frame(4, [0xFF; 6], NetU16::new(ETHERTYPE_IPV4), |cursor| {
        cursor.write_bytes(&[0; 4]);
    });
    assert_eq!(result, Err(TransmitError::NotInitialized));

    let nic = Arc::new(LoopbackNic::new(MAC, 4096));
    net::register_network_device(Box::new(nic.clone()));

    assert!(net::has_network_device());
    assert_eq!(net::get_link_addr(), Some(MAC));

    net::transmit_frame(4, [0xFF; 6], NetU16::new(ETHERTYPE_IPV4), |cursor| {
        cursor.write_bytes(&[0xAB; 4]);
    })
    .unwrap();

    let mut frames = Vec::new();
    nic.complete_tx(|frame| frames.push(frame.to_vec()));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].len(), HEADER_SIZE + 4);
    assert_eq!(&frames[0][6..12], &MAC);
    assert_eq!(&frames[0][14..], &[0xAB; 4]);
}
