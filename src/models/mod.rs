pub mod classification;
pub mod release;

pub use classification::{Classification, Severity};
pub use release::{GitHubRelease, Release};
