// File: cafe-site/src/effects.rs
// Purpose: Scroll-driven page effects as plain arithmetic

use crate::config::{EffectsConfig, NavigationConfig, SiteConfig};

/// Delays (ms) before a testimonial's stars, text and author are revealed
pub const TESTIMONIAL_REVEAL_MS: [u64; 3] = [100, 300, 500];

/// Delay before a product card slides into place
pub const PRODUCT_REVEAL_MS: u64 = 200;

/// Lifetime of the click ripple on product buttons
pub const RIPPLE_MS: u64 = 600;

/// Extra animation delay per testimonial, in seconds
pub const TESTIMONIAL_STAGGER_S: f64 = 0.2;

/// Share of an element that must be on screen before it is revealed
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// The bottom of the viewport is pulled up by this much when revealing
pub const REVEAL_MARGIN_PX: f64 = 50.0;

/// Share of the stats block that must be on screen to start the counters
pub const COUNTER_THRESHOLD: f64 = 0.5;

/// Inline style properties as `(property, value)` pairs
pub type StyleSet = &'static [(&'static str, &'static str)];

/// Elements that restyle themselves while the pointer is over them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    /// A `.product-card`; featured cards rest slightly enlarged
    ProductCard { featured: bool },
    Testimonial,
    /// The `.item-icon img` inside a `.menu-item`
    MenuIcon,
    /// The `.item-price` inside a `.menu-item`
    MenuPrice,
}

impl HoverTarget {
    /// Styles to apply on `mouseenter` (`hovered`) or `mouseleave`
    pub fn styles(self, hovered: bool) -> StyleSet {
        match (self, hovered) {
            (HoverTarget::ProductCard { .. }, true) => &[("transform", "translateY(-10px) scale(1.02)")],
            (HoverTarget::ProductCard { featured: true }, false) => &[("transform", "scale(1.05)")],
            (HoverTarget::ProductCard { featured: false }, false) => &[("transform", "translateY(0) scale(1)")],
            (HoverTarget::Testimonial, true) => &[
                ("transform", "translateY(-5px) scale(1.02)"),
                ("box-shadow", "0 20px 40px rgba(139, 69, 19, 0.2)"),
            ],
            (HoverTarget::Testimonial, false) => &[
                ("transform", "translateY(0) scale(1)"),
                ("box-shadow", "0 10px 30px rgba(139, 69, 19, 0.1)"),
            ],
            (HoverTarget::MenuIcon, true) => &[("transform", "scale(1.1) rotate(5deg)")],
            (HoverTarget::MenuIcon, false) => &[("transform", "scale(1) rotate(0deg)")],
            (HoverTarget::MenuPrice, true) => &[("color", "#8B4513"), ("transform", "scale(1.1)")],
            (HoverTarget::MenuPrice, false) => &[("color", "#D2B48C"), ("transform", "scale(1)")],
        }
    }
}

/// Vertical extent of a page section with an `id`
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Transform applied to one decorative coffee bean
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeanTransform {
    pub translate_y: f64,
    pub rotation: f64,
}

impl BeanTransform {
    pub fn to_css(&self) -> String {
        format!("translateY({}px) rotate({}deg)", self.translate_y, self.rotation)
    }
}

/// Size and offset of a click ripple centred on a button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    navigation: NavigationConfig,
    effects: EffectsConfig,
}

impl Effects {
    pub fn new(navigation: NavigationConfig, effects: EffectsConfig) -> Self {
        Self { navigation, effects }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.navigation.clone(), config.effects.clone())
    }

    /// Whether the navbar should carry the `scrolled` class
    pub fn navbar_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.navigation.scrolled_threshold
    }

    /// Section whose nav link should be highlighted. When sections overlap
    /// the last matching one wins; `None` leaves the current highlight alone.
    pub fn active_section<'a>(&self, sections: &'a [SectionBounds], scroll_y: f64) -> Option<&'a str> {
        let probe = scroll_y + self.navigation.active_offset;
        sections
            .iter()
            .filter(|s| s.contains(probe))
            .last()
            .map(|s| s.id.as_str())
    }

    /// Where to scroll so a section starts just below the fixed navbar
    pub fn scroll_target(&self, section_top: f64) -> f64 {
        section_top - self.navigation.navbar_height
    }

    /// Background offset of parallax sections
    pub fn parallax_offset(&self, scroll_y: f64) -> f64 {
        scroll_y * self.effects.parallax_rate
    }

    pub fn parallax_css(&self, scroll_y: f64) -> String {
        format!("center {}px", self.parallax_offset(scroll_y))
    }

    /// Beans further down the list move and spin faster
    pub fn bean_transform(&self, index: usize, scroll_y: f64) -> BeanTransform {
        let i = index as f64;
        let speed = self.effects.bean_base_speed + i * self.effects.bean_speed_step;
        BeanTransform {
            translate_y: -(scroll_y * speed),
            rotation: scroll_y * self.effects.bean_rotation_rate + i * self.effects.bean_rotation_step,
        }
    }

    /// Reveal delay of the n-th menu item
    pub fn menu_stagger(&self, index: usize) -> u64 {
        index as u64 * self.effects.menu_stagger_ms
    }

    /// CSS `animation-delay` for the n-th testimonial
    pub fn testimonial_delay_css(index: usize) -> String {
        format!("{}s", index as f64 * TESTIMONIAL_STAGGER_S)
    }

    /// Fraction of an element (0.0..=1.0) inside the viewport, with the
    /// viewport bottom shrunk by `bottom_margin`
    pub fn visible_fraction(top: f64, height: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
        if height <= 0.0 {
            return 0.0;
        }
        let visible = (top + height).min(viewport_height - bottom_margin) - top.max(0.0);
        (visible / height).clamp(0.0, 1.0)
    }

    /// Whether an element has scrolled far enough into view to animate in
    pub fn should_reveal(top: f64, height: f64, viewport_height: f64) -> bool {
        Self::visible_fraction(top, height, viewport_height, REVEAL_MARGIN_PX) >= REVEAL_THRESHOLD
    }

    /// Whether a lazy image touches the viewport. An image without a source
    /// may still have zero height, so touching an edge counts.
    pub fn should_load_image(top: f64, height: f64, viewport_height: f64) -> bool {
        top <= viewport_height && top + height.max(0.0) >= 0.0
    }

    /// Whether the stats block is visible enough to start counting
    pub fn should_start_counters(top: f64, height: f64, viewport_height: f64) -> bool {
        Self::visible_fraction(top, height, viewport_height, 0.0) >= COUNTER_THRESHOLD
    }

    pub fn ripple(width: f64, height: f64) -> Ripple {
        let size = width.max(height);
        Ripple {
            size,
            left: width / 2.0 - size / 2.0,
            top: height / 2.0 - size / 2.0,
        }
    }

    pub fn effects_config(&self) -> &EffectsConfig {
        &self.effects
    }
}
