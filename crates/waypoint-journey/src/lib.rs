#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/waypoint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod error;
pub mod frame;
pub mod journey;
pub mod store;
pub mod touchpoint;

pub use channel::{ChannelCatalog, ChannelKind};
pub use error::{JourneyError, Result};
pub use journey::{Conversion, Exposure, Journey};
pub use store::JourneyStore;
pub use touchpoint::{CustomerId, Touchpoint};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
