//! Payment CTA derivation and gating for messages carrying payment data.

pub mod ports;
pub mod service;

pub use service::{PaymentCta, PaymentCtaService, PaymentNavigation};
