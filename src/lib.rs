//! Optical band-gap estimation from reflectance and transmittance spectra.
//!
//! ```text
//!  wavelength / signal table
//!        │
//!        ▼
//!   ┌──────────┐      ┌───────────┐      ┌──────────┐
//!   │  optics   │ ──▶ │ pipeline   │ ──▶ │  export   │
//!   └──────────┘      └───────────┘      └──────────┘
//!                            │
//!                            ▼
//!                      ┌──────────┐      ┌────────────┐
//!                      │ compare   │ ◀── │ literature  │
//!                      └──────────┘      └────────────┘
//! ```

pub mod compare;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod literature;
pub mod optics;
pub mod pipeline;

pub use error::{AnalysisError, Result};
