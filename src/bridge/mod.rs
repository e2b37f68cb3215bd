//! Dispatch layer between the JavaScript facade and [`Analytics`](crate::analytics::Analytics).
//!
//! An invocation arrives as a method name plus a JSON array of positional arguments and ends
//! with exactly one [`BridgeResponse`].

pub mod args;
pub mod callback;
pub mod method;
mod plugin;

pub use args::BridgeArgs;
pub use callback::{BridgeResponse, CallbackContext, PendingResponse};
pub use method::{BridgeMethod, UnknownMethod};
pub use plugin::AnalyticsPlugin;
