//! Domain logic - pure version and history types independent of git operations

pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use commit::Commit;
pub use prerelease::PreRelease;
pub use tag::{Tag, SENTINEL_TAG};
pub use version::{BumpType, FourComponent, SemVer, VersionDecision};
