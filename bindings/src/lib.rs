//! # TGFORM BINDINGS
//!
//! **RUNS THE FORM ENGINE INSIDE A CHAT MINI-APP PAGE**
//!
//! **ARCHITECTURE**: `HostBridge` over the platform's `WebApp` object, an
//! `HttpClient` over `fetch` and a `FormView` over the page's controls
//! **COMPATIBILITY**: Browser code is only compiled for `wasm32`

pub mod session;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FormSession;

pub use session::{prepare, SessionSetup};
