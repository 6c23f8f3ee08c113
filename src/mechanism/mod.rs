//! The Mechanism
//!
//! VCG payments for the edges of a cheapest path, with diagnostics routed
//! through an injected observer.

mod observer;
mod vcg;

pub use observer::{format_path, NoopObserver, PaymentObserver, TracingObserver};
pub use vcg::{DisconnectPolicy, PathPaymentCalculator, PaymentMap};
