//! Decorative floating dots scattered over hero backgrounds.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{ParticleConfig, Span};

pub const CONTAINER_SELECTOR: &str = ".floating-particles, .floating-dots";

const POSITION_PCT: Span = Span::new(0.0, 100.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub size_px: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub opacity: f64,
    pub duration_secs: f64,
    pub delay_secs: f64,
    pub color: String,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &ParticleConfig) -> Self {
        let size_px = config.size_px.sample(rng);
        let left_pct = POSITION_PCT.sample(rng);
        let top_pct = POSITION_PCT.sample(rng);
        let duration_secs = config.duration_secs.sample(rng);
        let delay_secs = config.delay_secs.sample(rng);
        let color = config
            .colors
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| "currentColor".to_string());
        let opacity = config.opacity.sample(rng);
        Self {
            size_px,
            left_pct,
            top_pct,
            opacity,
            duration_secs,
            delay_secs,
            color,
        }
    }

    /// Inline style for the particle's `<div>`.
    pub fn css_text(&self) -> String {
        format!(
            "position: absolute; width: {size:.2}px; height: {size:.2}px; \
             background: {color}; border-radius: 50%; left: {left:.2}%; top: {top:.2}%; \
             opacity: {opacity:.3}; \
             animation: particleFloat {duration:.2}s ease-in-out {delay:.2}s infinite; \
             pointer-events: none;",
            size = self.size_px,
            color = self.color,
            left = self.left_pct,
            top = self.top_pct,
            opacity = self.opacity,
            duration = self.duration_secs,
            delay = self.delay_secs,
        )
    }
}

/// One container's worth of particles.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &ParticleConfig) -> Vec<Particle> {
    (0..config.count)
        .map(|_| Particle::random(rng, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn within(value: f64, span: Span) -> bool {
        value >= span.min && value < span.max
    }

    #[test]
    fn generates_configured_count_within_ranges() {
        let config = ParticleConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let particles = generate(&mut rng, &config);

        assert_eq!(particles.len(), 20);
        for p in &particles {
            assert!(within(p.size_px, config.size_px), "size {}", p.size_px);
            assert!(within(p.opacity, config.opacity), "opacity {}", p.opacity);
            assert!(within(p.duration_secs, config.duration_secs));
            assert!(within(p.delay_secs, config.delay_secs));
            assert!(within(p.left_pct, POSITION_PCT) && within(p.top_pct, POSITION_PCT));
            assert!(config.colors.contains(&p.color));
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let config = ParticleConfig::default();
        let a = generate(&mut StdRng::seed_from_u64(3), &config);
        let b = generate(&mut StdRng::seed_from_u64(3), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn css_text_carries_animation() {
        let particle = Particle {
            size_px: 3.0,
            left_pct: 12.5,
            top_pct: 80.0,
            opacity: 0.25,
            duration_secs: 14.0,
            delay_secs: 1.5,
            color: "#22c55e".to_string(),
        };
        let css = particle.css_text();
        assert!(css.contains("width: 3.00px"));
        assert!(css.contains("background: #22c55e"));
        assert!(css.contains("left: 12.50%"));
        assert!(css.contains("animation: particleFloat 14.00s ease-in-out 1.50s infinite"));
    }
}
