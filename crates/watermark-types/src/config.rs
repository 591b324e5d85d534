use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{frame::Rgb, Result, WatermarkError};

/// Extra glyph supplied through configuration, one byte per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphSpec {
    pub character: String,
    pub rows: [u8; 8],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StampConfig {
    pub label: String,
    pub origin_x: i32,
    pub origin_y: i32,
    /// Horizontal distance between consecutive characters.
    pub advance: i32,
    pub color: Rgb,
    pub glyphs: Vec<GlyphSpec>,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            label: "A".into(),
            origin_x: 10,
            origin_y: 10,
            advance: 8,
            color: Rgb::RED,
            glyphs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsConfig {
    pub log_level: String,
    pub output_dir: Option<String>,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    pub stamp: StampConfig,
    pub ops: OpsConfig,
}

impl WatermarkConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| {
            WatermarkError::Configuration(format!(
                "unable to read config file {}: {err}",
                path_ref.display()
            ))
        })?;
        toml::from_str(&contents).map_err(|err| {
            WatermarkError::Configuration(format!(
                "failed to parse config file {}: {err}",
                path_ref.display()
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.stamp.label.is_empty() {
            return Err(WatermarkError::Configuration(
                "stamp.label must not be empty".into(),
            ));
        }
        if self.stamp.advance < 0 {
            return Err(WatermarkError::Configuration(
                "stamp.advance must not be negative".into(),
            ));
        }
        for glyph in &self.stamp.glyphs {
            if glyph.character.chars().count() != 1 {
                return Err(WatermarkError::Configuration(format!(
                    "stamp.glyphs character {:?} must be exactly one character",
                    glyph.character
                )));
            }
        }
        if self.ops.log_level.trim().is_empty() {
            return Err(WatermarkError::Configuration(
                "ops.log_level must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_watermark_config_from_file() {
        let temp_path = std::env::temp_dir()
            .join(format!("watermark-config-test-{}.toml", std::process::id()));
        let config = WatermarkConfig {
            stamp: StampConfig {
                label: "AB".into(),
                origin_x: 4,
                origin_y: 6,
                advance: 9,
                color: Rgb::new(0, 255, 0),
                glyphs: vec![GlyphSpec {
                    character: "B".into(),
                    rows: [0xFE, 0x81, 0x81, 0xFE, 0x81, 0x81, 0x81, 0xFE],
                }],
            },
            ops: OpsConfig {
                log_level: "debug".into(),
                output_dir: Some("frames".into()),
            },
        };

        let doc = toml::to_string(&config).expect("serialize config");
        fs::write(&temp_path, doc).expect("write temp config");

        let loaded = WatermarkConfig::from_file(&temp_path).expect("load config");
        assert_eq!(loaded.stamp.label, config.stamp.label);
        assert_eq!(loaded.stamp.advance, 9);
        assert_eq!(loaded.stamp.color, Rgb::new(0, 255, 0));
        assert_eq!(loaded.stamp.glyphs, config.stamp.glyphs);
        assert_eq!(loaded.ops.output_dir.as_deref(), Some("frames"));
        fs::remove_file(&temp_path).expect("cleanup temp config");
    }

    #[test]
    fn partial_document_uses_defaults() {
        let loaded: WatermarkConfig = toml::from_str("[stamp]\nlabel = \"AAA\"\n").expect("parse");
        assert_eq!(loaded.stamp.label, "AAA");
        assert_eq!((loaded.stamp.origin_x, loaded.stamp.origin_y), (10, 10));
        assert_eq!(loaded.stamp.advance, 8);
        assert_eq!(loaded.stamp.color, Rgb::RED);
        assert_eq!(loaded.ops.log_level, "info");
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let path = std::env::temp_dir()
            .join(format!("watermark-config-missing-{}.toml", std::process::id()));
        assert!(matches!(
            WatermarkConfig::from_file(&path),
            Err(WatermarkError::Configuration(_))
        ));
    }

    #[test]
    fn validate_configuration_rules() {
        let mut config = WatermarkConfig::default();
        assert!(config.validate().is_ok());

        config.stamp.label.clear();
        assert!(config.validate().is_err());
        config.stamp.label = "A".into();
        config.stamp.advance = -1;
        assert!(config.validate().is_err());
        config.stamp.advance = 8;
        config.stamp.glyphs.push(GlyphSpec {
            character: "BC".into(),
            rows: [0; 8],
        });
        assert!(config.validate().is_err());
        config.stamp.glyphs[0].character = "B".into();
        config.ops.log_level = " ".into();
        assert!(config.validate().is_err());
        config.ops.log_level = "warn".into();
        assert!(config.validate().is_ok());
    }
}
