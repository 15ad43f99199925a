//! Page behavior for the Smart Plant Box landing site.
//!
//! Nothing here touches the browser. The `frontend` crate feeds DOM events in
//! as plain values and applies what comes back out.

pub mod accordion;
pub mod chat;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod intro;
pub mod media;
pub mod nav;
pub mod observer;
pub mod particles;
pub mod reveal;
pub mod scroll;
pub mod styles;

pub use config::SiteConfig;
pub use error::InteractionError;
