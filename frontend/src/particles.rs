use interactions::config::ParticleConfig;
use interactions::particles::{self, CONTAINER_SELECTOR};
use interactions::styles::PARTICLE_STYLE;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dom;
use crate::error::FrontendError;

/// Fills every particle container with randomly placed floating dots.
pub(crate) fn mount(config: &ParticleConfig) -> Result<(), FrontendError> {
    let containers = dom::select_all(CONTAINER_SELECTOR)?;
    if containers.is_empty() {
        return Err(FrontendError::MissingElement(CONTAINER_SELECTOR.to_string()));
    }

    let document = dom::document()?;
    let mut rng = StdRng::from_entropy();
    for container in &containers {
        for particle in particles::generate(&mut rng, config) {
            let dot = document.create_element("div")?;
            dot.set_attribute("style", &particle.css_text())?;
            container.append_child(&dot)?;
        }
    }
    dom::ensure_style(&PARTICLE_STYLE)?;

    log::info!(
        "Spawned {} particles in {} containers",
        config.count * containers.len(),
        containers.len()
    );
    Ok(())
}
