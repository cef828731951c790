pub mod gate;

pub use gate::{AuthGate, AuthState, GateDecision};
