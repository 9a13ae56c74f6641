use tc_wire::{
    action::verdict::TC_ACT_PIPE,
    pedit::{
        pack_key, pack_mac, parse_command, EditCmd, EditKey, HeaderType, KeyEx, PeditCommand,
        PeditSelector, ValueType, Width, MAX_PEDIT_KEYS, TCA_ACT_PEDIT,
    },
    Error,
};

/// `pedit ex munge eth dst set 02:00:00:00:00:01 munge ip ttl add 255 pipe`
#[test]
fn rewrite_eth_dst_and_decrement_ttl() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut sel = PeditSelector::extended().with_action(TC_ACT_PIPE);

    let eth_dst = EditKey { htype: HeaderType::Eth, ..Default::default() };
    parse_command(
        &PeditCommand::new("eth dst", "set", "02:00:00:00:00:01"),
        6,
        ValueType::Mac,
        u32::MAX,
        &mut sel,
        eth_dst,
    )
    .unwrap();

    let ttl = EditKey { offset: 8, htype: HeaderType::Ip4, ..Default::default() };
    parse_command(
        &PeditCommand::new("ip ttl", "add", "255"),
        1,
        ValueType::Int,
        0xFF,
        &mut sel,
        ttl,
    )
    .unwrap();

    assert_eq!(sel.len(), 3);
    assert_eq!(
        sel.keys_ex(),
        &[
            KeyEx { htype: HeaderType::Eth, cmd: EditCmd::Set },
            KeyEx { htype: HeaderType::Eth, cmd: EditCmd::Set },
            KeyEx { htype: HeaderType::Ip4, cmd: EditCmd::Add },
        ]
    );

    let bytes = sel.encode().unwrap();
    assert_eq!(bytes.len(), 24 + 3 * 24);
    // nkeys and flags follow the generic action header.
    assert_eq!(&bytes[20..24], &[3, 0, 0, 0]);
    assert_eq!(&bytes[8..12], &TC_ACT_PIPE.to_ne_bytes());

    // eth dst bytes 0..4: mask 0, value 02 00 00 00.
    assert_eq!(&bytes[24..32], &[0, 0, 0, 0, 0x02, 0x00, 0x00, 0x00]);
    // eth dst bytes 4..6 in the upper half of the word at 4.
    assert_eq!(&bytes[48..56], &[0x00, 0x00, 0xFF, 0xFF, 0x00, 0x01, 0x00, 0x00]);
    assert_eq!(&bytes[56..60], &4u32.to_ne_bytes());
    // ttl in the top byte of the word at 8.
    assert_eq!(&bytes[72..80], &[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00]);
    assert_eq!(&bytes[80..84], &8u32.to_ne_bytes());

    let decoded = PeditSelector::decode(&bytes).unwrap();
    assert_eq!(decoded.keys(), sel.keys());
    assert_eq!(decoded.gen().action, TC_ACT_PIPE);
    assert_eq!(TCA_ACT_PEDIT, 7);
}

#[test]
fn mac_at_half_word_covers_six_bytes() {
    let mac = [0x10, 0x21, 0x32, 0x43, 0x54, 0x65];
    let mut sel = PeditSelector::new();
    pack_mac(&mut sel, &EditKey::new(6, 0), mac).unwrap();

    // Apply the keys to a zeroed buffer the way the kernel does and check the edited span.
    let mut packet = [0xAAu8; 16];
    for key in sel.keys() {
        let off = key.off as usize;
        let word = u32::from_be_bytes(packet[off..off + 4].try_into().unwrap());
        let edited = (word & key.mask) ^ key.val;
        packet[off..off + 4].copy_from_slice(&edited.to_be_bytes());
    }

    assert_eq!(&packet[..6], &[0xAA; 6]);
    assert_eq!(&packet[6..12], &mac);
    assert_eq!(&packet[12..], &[0xAA; 4]);
}

#[test]
fn mac_at_word_covers_six_bytes() {
    let mac = [0x10, 0x21, 0x32, 0x43, 0x54, 0x65];
    let mut sel = PeditSelector::new();
    pack_mac(&mut sel, &EditKey::new(4, 0), mac).unwrap();

    let mut packet = [0xAAu8; 16];
    for key in sel.keys() {
        let off = key.off as usize;
        let word = u32::from_be_bytes(packet[off..off + 4].try_into().unwrap());
        let edited = (word & key.mask) ^ key.val;
        packet[off..off + 4].copy_from_slice(&edited.to_be_bytes());
    }

    assert_eq!(&packet[..4], &[0xAA; 4]);
    assert_eq!(&packet[4..10], &mac);
    assert_eq!(&packet[10..], &[0xAA; 6]);
}

#[test]
fn failures_leave_selector_untouched() {
    let mut sel = PeditSelector::new();
    pack_key(&mut sel, &EditKey::new(0, 1)).unwrap();
    let before = sel.clone();

    let failures = [
        pack_key(&mut sel, &EditKey::new(2, 1)),
        pack_key(&mut sel, &EditKey::new(3, 1).with_width(Width::U16)),
        pack_key(&mut sel, &EditKey::new(0, 0x100).with_width(Width::U8)),
        pack_key(&mut sel, &EditKey::new(0, 0x1_0000).with_width(Width::U16)),
        pack_key(&mut sel, &EditKey::new(0, 1).with_htype(HeaderType::Udp)),
        pack_mac(&mut sel, &EditKey::new(1, 0), [0; 6]),
        parse_command(
            &PeditCommand::new("ip dst", "set", "not-an-ip"),
            4,
            ValueType::Ipv4,
            u32::MAX,
            &mut sel,
            EditKey::default(),
        ),
        parse_command(
            &PeditCommand::new("ip tos", "set", "1"),
            8,
            ValueType::U32,
            u32::MAX,
            &mut sel,
            EditKey::default(),
        ),
    ];

    for failure in failures {
        assert!(failure.is_err());
    }
    assert_eq!(sel, before);
}

#[test]
fn capacity_is_enforced() {
    let mut sel = PeditSelector::new();
    for i in 0..MAX_PEDIT_KEYS as u32 {
        pack_key(&mut sel, &EditKey::new(4 * (i % 16), i)).unwrap();
    }
    assert_eq!(sel.encode().unwrap().len(), 24 + MAX_PEDIT_KEYS * 24);

    assert_eq!(
        pack_key(&mut sel, &EditKey::new(0, 0)),
        Err(Error::CapacityExceeded { capacity: MAX_PEDIT_KEYS })
    );
    assert_eq!(sel.len(), MAX_PEDIT_KEYS);
}

#[test]
fn extended_mode_error_names_the_fix() {
    let mut sel = PeditSelector::new();
    let err = pack_key(&mut sel, &EditKey::new(0, 1).with_cmd(EditCmd::Add)).unwrap_err();
    assert!(err.to_string().contains("extended mode"));
}
