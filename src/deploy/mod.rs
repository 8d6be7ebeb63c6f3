// Deployment module entrypoint
pub mod deployer; // drives the plan against a backend
pub mod manifest; // name -> address record, written after full success
pub mod plan; // the fixed, link-ordered component list

pub use deployer::Deployer;
pub use manifest::Manifest;
pub use plan::ComponentSpec;

use crate::error::BootResult;

/// Seam to the chain transport. One deploy call per component, one link call
/// per declared dependency; the backend is a black box beyond that.
#[async_trait::async_trait]
pub trait ContractBackend {
    /// Deploy the named component and return its address.
    async fn deploy(&self, name: &str) -> BootResult<String>;

    /// Link an already-deployed library into a component that is about to be
    /// deployed.
    async fn link(&self, target: &str, library: &str, address: &str) -> BootResult<()>;
}
