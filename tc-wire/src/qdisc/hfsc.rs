//! HFSC (Hierarchical Fair Service Curve) parameters.
//!
//! A class carries up to three two-piece linear service curves: real-time (`rsc`),
//! link-sharing (`fsc`) and upper-limit (`usc`). Each is sent as its own attribute.

use bytes::{Buf, BufMut};

use crate::record::Record;

/// Real-time curve attribute type.
pub const TCA_HFSC_RSC: u16 = 1;
/// Link-sharing curve attribute type.
pub const TCA_HFSC_FSC: u16 = 2;
/// Upper-limit curve attribute type.
pub const TCA_HFSC_USC: u16 = 3;

/// The kernel's `tc_service_curve`: slope `m1` for the first `d` microseconds, then `m2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceCurve {
    /// Slope of the first segment, bytes per second.
    pub m1: u32,
    /// Length of the first segment, microseconds.
    pub d: u32,
    /// Slope of the second segment, bytes per second.
    pub m2: u32,
}

impl ServiceCurve {
    /// A curve with both segments.
    pub const fn new(m1: u32, d: u32, m2: u32) -> Self {
        Self { m1, d, m2 }
    }

    /// A linear curve of slope `m2`.
    pub const fn linear(m2: u32) -> Self {
        Self { m1: 0, d: 0, m2 }
    }

    /// `(m1, d, m2)`.
    pub const fn attrs(&self) -> (u32, u32, u32) {
        (self.m1, self.d, self.m2)
    }
}

impl Record for ServiceCurve {
    const SIZE: usize = 12;
    const NAME: &'static str = "tc_service_curve";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_ne(self.m1);
        dst.put_u32_ne(self.d);
        dst.put_u32_ne(self.m2);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self { m1: src.get_u32_ne(), d: src.get_u32_ne(), m2: src.get_u32_ne() }
    }
}

/// The three curves of an HFSC class, in attribute order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HfscClassOpt {
    /// Real-time curve.
    pub rsc: ServiceCurve,
    /// Link-sharing curve.
    pub fsc: ServiceCurve,
    /// Upper-limit curve.
    pub usc: ServiceCurve,
}

impl HfscClassOpt {
    /// `(attribute type, curve)` pairs, the way the message assembler emits them.
    pub const fn curves(&self) -> [(u16, ServiceCurve); 3] {
        [(TCA_HFSC_RSC, self.rsc), (TCA_HFSC_FSC, self.fsc), (TCA_HFSC_USC, self.usc)]
    }
}

impl Record for HfscClassOpt {
    const SIZE: usize = 3 * ServiceCurve::SIZE;
    const NAME: &'static str = "hfsc_copt";

    fn put<B: BufMut>(&self, dst: &mut B) {
        self.rsc.put(dst);
        self.fsc.put(dst);
        self.usc.put(dst);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self {
            rsc: ServiceCurve::get(src),
            fsc: ServiceCurve::get(src),
            usc: ServiceCurve::get(src),
        }
    }
}

/// The kernel's `tc_hfsc_qopt`, the qdisc-level options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcHfscQopt {
    /// Minor number of the default class.
    pub defcls: u16,
}

impl Record for TcHfscQopt {
    const SIZE: usize = 2;
    const NAME: &'static str = "tc_hfsc_qopt";

    fn put<B: BufMut>(&self, dst: &mut B) {
        dst.put_u16_ne(self.defcls);
    }

    fn get<B: Buf>(src: &mut B) -> Self {
        Self { defcls: src.get_u16_ne() }
    }
}
