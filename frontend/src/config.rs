use serde::Deserialize;
use web_sys::Document;

use crate::error::UiResult;

/// Element id of the optional JSON block that overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Timings, thresholds and breakpoints for every behavior on the page.
///
/// All fields have defaults, so the page only needs to supply the values it
/// wants to change:
///
/// ```html
/// <script type="application/json" id="site-config">
///   { "carousel": { "autoplay_ms": 5000 } }
/// </script>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
    pub tilt: TiltConfig,
    pub loader: LoaderConfig,
    pub forms: FormConfig,
    pub navbar: NavbarConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay_ms: u32,
    pub transition: String,
    /// Used when the track's computed column gap cannot be read.
    pub gap_fallback_px: f64,
    /// Viewports at or below this width center the active slide.
    pub center_below_px: f64,
    pub wrapper_padding_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_ms: 3000,
            transition: "transform 0.5s ease-out".to_string(),
            gap_fallback_px: 30.0,
            center_below_px: 1024.0,
            wrapper_padding_px: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub classes: Vec<String>,
    pub threshold: f64,
    pub root_margin: String,
    pub active_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            classes: [
                "reveal-on-scroll",
                "reveal-fade",
                "reveal-scale",
                "reveal-pop",
                "reveal-slide-left",
                "reveal-slide-right",
            ]
            .iter()
            .map(|class| class.to_string())
            .collect(),
            threshold: 0.15,
            root_margin: "0px 0px -50px 0px".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Fraction of the scroll distance the background travels.
    pub speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { speed: 0.4 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    pub max_degrees: f64,
    pub perspective_px: f64,
    pub hover_scale: f64,
    pub track_transition: String,
    pub reset_transition: String,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_degrees: 5.0,
            perspective_px: 1000.0,
            hover_scale: 1.02,
            track_transition: "transform 0.1s ease".to_string(),
            reset_transition: "transform 0.5s ease".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub splash_ms: u32,
    pub fade_ms: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            splash_ms: 1500,
            fade_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub submit_delay_ms: u32,
    pub sending_label: String,
    pub sending_opacity: String,
    pub confirmation: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            sending_label: "Sending...".to_string(),
            sending_opacity: "0.7".to_string(),
            confirmation:
                "Thank you! Your request has been received. We will contact you shortly."
                    .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub shadow_after_px: f64,
    pub shadow: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            shadow_after_px: 50.0,
            shadow: "0 10px 30px rgba(0,0,0,0.05)".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> UiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads overrides from the page, falling back to the defaults when the
    /// block is missing or malformed.
    pub fn load(document: &Document) -> Self {
        let Some(json) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => {
                log::debug!("Loaded site config overrides");
                config
            }
            Err(e) => {
                log::warn!("Ignoring site config: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.carousel.autoplay_ms, 3000);
        assert_eq!(config.reveal.classes.len(), 6);
    }

    #[test]
    fn partial_override_keeps_sibling_defaults() {
        let config =
            SiteConfig::from_json(r#"{ "carousel": { "autoplay_ms": 5000 }, "parallax": { "speed": 0.2 } }"#)
                .unwrap();
        assert_eq!(config.carousel.autoplay_ms, 5000);
        assert_eq!(config.carousel.transition, "transform 0.5s ease-out");
        assert_eq!(config.parallax.speed, 0.2);
        assert_eq!(config.tilt, TiltConfig::default());
    }

    #[test]
    fn clone_margin_is_not_configurable() {
        let config = SiteConfig::from_json(r#"{ "carousel": { "clone_margin": 0 } }"#).unwrap();
        assert_eq!(config.carousel, CarouselConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::from_json("{ carousel: ").unwrap_err();
        assert!(matches!(err, crate::error::UiError::Config(_)));
    }
}
