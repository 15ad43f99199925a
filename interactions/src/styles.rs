//! Style sheets injected at runtime, plus CSS value formatting.

/// A `<style>` block inserted into `<head>` at most once, keyed by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectedStyle {
    pub id: &'static str,
    pub css: &'static str,
}

pub const REVEAL_STYLE: InjectedStyle = InjectedStyle {
    id: "reveal-styles",
    css: r#"
        .animate-in {
            opacity: 1 !important;
            transform: translateY(0) !important;
        }
    "#,
};

pub const PARTICLE_STYLE: InjectedStyle = InjectedStyle {
    id: "particle-styles",
    css: r#"
        @keyframes particleFloat {
            0%, 100% {
                transform: translate(0, 0) scale(1);
                opacity: 0.2;
            }
            25% {
                transform: translate(20px, -30px) scale(1.2);
                opacity: 0.5;
            }
            50% {
                transform: translate(-10px, -60px) scale(0.8);
                opacity: 0.3;
            }
            75% {
                transform: translate(15px, -30px) scale(1.1);
                opacity: 0.4;
            }
        }
    "#,
};

pub const TYPING_STYLE: InjectedStyle = InjectedStyle {
    id: "typing-styles",
    css: r#"
        @keyframes typingBounce {
            0%, 60%, 100% {
                transform: translateY(0);
            }
            30% {
                transform: translateY(-4px);
            }
        }
        @keyframes chatSlideDown {
            from {
                opacity: 1;
                transform: translateY(0) scale(1);
            }
            to {
                opacity: 0;
                transform: translateY(20px) scale(0.95);
            }
        }
    "#,
};

pub const MOBILE_MENU_CSS: &str = "position: fixed; top: 70px; left: 0; width: 100%; \
    background: var(--color-bg-elevated); border-bottom: 1px solid var(--color-border); \
    padding: var(--spacing-lg); display: none; flex-direction: column; \
    gap: var(--spacing-md); z-index: 999;";

pub const MOBILE_LINK_CSS: &str = "display: block; padding: var(--spacing-sm) 0; \
    font-size: 0.875rem; font-weight: 500; letter-spacing: 0.1em; \
    color: var(--color-text-secondary); border-bottom: 1px solid var(--color-border);";

/// Formats a CSS time value rounded to the millisecond, so `0.1 * 3`
/// renders as `0.3s`.
pub fn seconds(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}s", rounded)
}
