//! # TGFORM CORE LIBRARY
//!
//! **REAL-TIME VALIDATION AND SUBMIT GATING FOR CHAT MINI-APP FORMS**
//!
//! **ARCHITECTURE**: Normalizer -> trait-based rule sets -> error presenter,
//! with a derived submit gate and pluggable delivery strategies
//! **GUARANTEE**: The submit affordance is enabled iff every field is valid
//! **COMPATIBILITY**: Host platform reached only through the `HostBridge` trait

pub mod api;
pub mod bridge;
pub mod config;
pub mod controller;
pub mod delivery;
pub mod errors;
pub mod events;
pub mod form;
pub mod gate;
pub mod normalize;
pub mod params;
pub mod presenter;
// Recording doubles for the host, the page and the network
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;
pub mod variants;
pub mod view;

// **VALIDATION MODULE REGISTRATION**
pub mod validation;
