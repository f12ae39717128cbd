#[cfg(feature = "cli")]
pub mod report;
