//! Drives a deployment plan against a backend, strictly in sequence.
//!
//! Per component the steps are: verify every declared dependency already has
//! an address, link each one, deploy, record the address. A failure anywhere
//! aborts the rest of the plan and the partial manifest is dropped with it;
//! nothing is persisted here.

use tracing::{debug, info};

use crate::deploy::plan::ComponentSpec;
use crate::deploy::{ContractBackend, Manifest};
use crate::error::{BootError, BootResult};

pub struct Deployer<'a> {
    backend: &'a dyn ContractBackend,
}

impl<'a> Deployer<'a> {
    pub fn new(backend: &'a dyn ContractBackend) -> Self {
        Self { backend }
    }

    pub async fn run(&self, plan: &[ComponentSpec]) -> BootResult<Manifest> {
        let mut manifest = Manifest::new();
        for spec in plan {
            self.deploy_component(spec, &mut manifest).await?;
        }
        info!(components = manifest.len(), "deployment plan complete");
        Ok(manifest)
    }

    async fn deploy_component(
        &self,
        spec: &ComponentSpec,
        manifest: &mut Manifest,
    ) -> BootResult<()> {
        // Every link target must already be in the manifest under
        // construction before we touch the network for this component.
        let mut links = Vec::with_capacity(spec.links.len());
        for dep in spec.links {
            match manifest.get(dep) {
                Some(address) => links.push((*dep, address.to_string())),
                None => {
                    return Err(BootError::UnresolvedDependency {
                        component: spec.name.to_string(),
                        dependency: dep.to_string(),
                    });
                }
            }
        }

        // Pending -> Linking (skipped when the component has no dependencies)
        for (library, address) in &links {
            debug!(component = spec.name, library, address = %address, "linking");
            self.backend.link(spec.name, library, address).await?;
        }

        // -> Deployed
        let address = self.backend.deploy(spec.name).await?;
        info!(component = spec.name, address = %address, "deployed");
        manifest.insert(spec.name, &address);
        Ok(())
    }
}
