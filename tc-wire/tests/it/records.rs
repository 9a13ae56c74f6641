use std::fmt::Debug;

use tc_wire::{
    action::{verdict, TcGen, TcMirred, TcPolice, TcTunnelKey},
    clock::PschedClock,
    filter::{u32::TC_U32_TERMINAL, TcU32Key, TcU32Sel, TcU32SelHeader},
    handle,
    msg::{TcActionMsg, TcMsg},
    pedit::{PeditHeader, PeditKey},
    qdisc::{
        HfscClassOpt, ServiceCurve, TcHfscQopt, TcHtbGlob, TcHtbOpt, TcNetemCorr,
        TcNetemCorrupt, TcNetemQopt, TcNetemReorder, TcPrioMap, TcRateSpec, TcTbfQopt,
    },
    decode_record, encode_record, Error, Record,
};

/// Encode, decode with trailing garbage, and reject one byte short.
fn check<R: Record + PartialEq + Debug>(record: R, size: usize) {
    let bytes = encode_record(&record);
    assert_eq!(R::SIZE, size, "{}", R::NAME);
    assert_eq!(bytes.len(), size, "{}", R::NAME);

    let mut padded = bytes.to_vec();
    padded.extend_from_slice(&[0xEE; 7]);
    assert_eq!(decode_record::<R>(&padded).unwrap(), record, "{}", R::NAME);

    assert_eq!(
        decode_record::<R>(&bytes[..size - 1]),
        Err(Error::Truncated { record: R::NAME, expected: size, actual: size - 1 })
    );
    assert!(decode_record::<R>(&[]).is_err());
}

#[test]
fn record_sizes() {
    let _ = tracing_subscriber::fmt::try_init();

    let clock = PschedClock::default();
    let rate = TcRateSpec::new(12_500_000, 1500);

    check(TcMsg::new().with_ifindex(3).with_handle(handle::make(1, 0)), 20);
    check(TcActionMsg::default(), 4);
    check(TcPrioMap::default(), 20);
    check(rate, 12);
    check(TcTbfQopt::new(&clock, 12_500_000, 65536, 65536, 1500), 36);
    check(TcHtbGlob::default(), 20);
    check(TcHtbOpt { rate, ceil: rate, prio: 1, ..Default::default() }, 44);
    check(TcNetemQopt::default().with_delay(&clock, 50_000, 5_000).with_loss(1.5), 24);
    check(TcNetemCorr { delay_corr: 1, loss_corr: 2, dup_corr: 3 }, 12);
    check(TcNetemReorder { probability: 7, correlation: 8 }, 8);
    check(TcNetemCorrupt { probability: 9, correlation: 10 }, 8);
    check(ServiceCurve::new(1000, 10, 500), 12);
    check(HfscClassOpt { fsc: ServiceCurve::linear(125_000), ..Default::default() }, 36);
    check(TcHfscQopt { defcls: 0x10 }, 2);
    check(TcGen::new(verdict::TC_ACT_OK), 20);
    check(TcMirred::egress_redirect(4), 28);
    check(TcTunnelKey { gen: TcGen::new(verdict::TC_ACT_PIPE), t_action: 2 }, 24);
    check(TcPolice { rate, action: verdict::TC_ACT_SHOT, ..Default::default() }, 56);
    check(TcU32Key::new(0x0000_0050, 0x0000_FFFF, 20), 16);
    check(TcU32SelHeader { flags: TC_U32_TERMINAL, ..Default::default() }, 16);
    check(PeditKey { mask: 0xFF00_FFFF, val: 0x0011_0000, off: 4, ..Default::default() }, 24);
    check(PeditHeader { gen: TcGen::new(verdict::TC_ACT_PIPE), nkeys: 0, flags: 0 }, 24);
}

#[test]
fn big_endian_fields_ignore_host_order() {
    let key = TcU32Key::new(0xC0A8_0001, 0xFFFF_FF00, 16);
    let bytes = key.encode();
    assert_eq!(&bytes[0..4], &[0xFF, 0xFF, 0xFF, 0x00]);
    assert_eq!(&bytes[4..8], &[0xC0, 0xA8, 0x00, 0x00]);

    let header = TcU32SelHeader { offmask: 0x0F00, hmask: 0x0000_00FF, ..Default::default() };
    let bytes = header.encode();
    assert_eq!(&bytes[4..6], &[0x0F, 0x00]);
    assert_eq!(&bytes[12..16], &[0x00, 0x00, 0x00, 0xFF]);
}

#[test]
fn u32_selector_round_trip() {
    let mut sel = TcU32Sel::new();
    sel.set_terminal(true);
    // match ip protocol 6 0xff
    sel.push_key(TcU32Key::new(0x0006_0000, 0x00FF_0000, 8)).unwrap();
    // match ip dport 80 0xffff
    sel.push_key(TcU32Key::new(0x0000_0050, 0x0000_FFFF, 20)).unwrap();

    let bytes = sel.encode().unwrap();
    assert_eq!(bytes.len(), 16 + 2 * 16);
    assert_eq!(bytes[2], 2);

    assert_eq!(TcU32Sel::decode(&bytes).unwrap(), sel);
    assert!(matches!(TcU32Sel::decode(&bytes[..40]), Err(Error::Truncated { .. })));
}

#[test]
fn psched_clock_drives_tbf() {
    let clock = PschedClock::parse("000003e8 00000040 000f4240 3b9aca00\n").unwrap();
    assert_eq!(clock.tick_in_usec(), 15.625);

    let tbf = TcTbfQopt::new(&clock, 1_000_000, 10_000, 20_000, 1500);
    // 10 KB at 1 MB/s is 10 ms, 156_250 ticks at 15.625 ticks per microsecond.
    assert_eq!(tbf.buffer, 156_250);
    assert_eq!(tbf.rate.cell_log, 3);
}
