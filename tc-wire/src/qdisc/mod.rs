//! Queueing discipline parameter records.
//!
//! | Kind    | Record(s)                                                       |
//! |---------|-----------------------------------------------------------------|
//! | `prio`  | [`TcPrioMap`]                                                   |
//! | `tbf`   | [`TcTbfQopt`] (two [`TcRateSpec`]s)                             |
//! | `netem` | [`TcNetemQopt`], [`TcNetemCorr`], [`TcNetemReorder`], [`TcNetemCorrupt`] |
//! | `htb`   | [`TcHtbGlob`] (qdisc), [`TcHtbOpt`] (class)                     |
//! | `hfsc`  | [`TcHfscQopt`] (qdisc), [`HfscClassOpt`] (class)                |

pub mod hfsc;
pub mod htb;
pub mod netem;
pub mod prio;
pub mod rate;
pub mod tbf;

pub use hfsc::{HfscClassOpt, ServiceCurve, TcHfscQopt};
pub use htb::{TcHtbGlob, TcHtbOpt};
pub use netem::{TcNetemCorr, TcNetemCorrupt, TcNetemQopt, TcNetemReorder};
pub use prio::TcPrioMap;
pub use rate::{LinkLayer, TcRateSpec};
pub use tbf::TcTbfQopt;
