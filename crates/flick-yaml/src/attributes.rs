//! Style attribute sets for flick toggles.
//!
//! An attribute set is a flat YAML mapping. Every key is optional and
//! unknown keys are rejected:
//!
//! ```yaml
//! text_on: "Yes"
//! text_off: "No"
//! text_size: 18
//! text_unit: sp
//! checked: false
//! enabled: true
//! on_background: "#4caf50"
//! off_background: "#9e9e9e"
//! thumb_background: "#ffffff"
//! test_id: wifi-switch
//! ```
//!
//! A sheet maps names to attribute sets so several toggles can be styled
//! from one document.

use crate::error::ParseError;
use flick_core::{Color, TextUnit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attributes as written in YAML, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_off: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_unit: Option<TextUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    off_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumb_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    off_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    test_id: Option<String>,
}

/// Validated style attributes for one flick toggle.
///
/// `None` leaves the toggle's default in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlickAttributes {
    /// Text shown while on
    pub text_on: Option<String>,
    /// Text shown while off
    pub text_off: Option<String>,
    /// Text size, finite and positive
    pub text_size: Option<f32>,
    /// Unit of `text_size`
    pub text_unit: TextUnit,
    /// Initial state
    pub checked: Option<bool>,
    /// Whether the toggle reacts to touch
    pub enabled: Option<bool>,
    /// Background of the on label
    pub on_background: Option<Color>,
    /// Background of the off label
    pub off_background: Option<Color>,
    /// Background of the thumb
    pub thumb_background: Option<Color>,
    /// Text color of the on label
    pub on_text_color: Option<Color>,
    /// Text color of the off label
    pub off_text_color: Option<Color>,
    /// Test ID
    pub test_id: Option<String>,
}

impl FlickAttributes {
    /// Parse one attribute set. Empty input yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawAttributes = serde_yaml_ng::from_str(yaml)?;
        Self::validate(raw)
    }

    /// Serialize back to YAML. Colors are written as `#rrggbb`.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        let raw = RawAttributes {
            text_on: self.text_on.clone(),
            text_off: self.text_off.clone(),
            text_size: self.text_size,
            text_unit: (self.text_unit != TextUnit::default()).then_some(self.text_unit),
            checked: self.checked,
            enabled: self.enabled,
            on_background: self.on_background.map(|c| c.to_hex()),
            off_background: self.off_background.map(|c| c.to_hex()),
            thumb_background: self.thumb_background.map(|c| c.to_hex()),
            on_text_color: self.on_text_color.map(|c| c.to_hex()),
            off_text_color: self.off_text_color.map(|c| c.to_hex()),
            test_id: self.test_id.clone(),
        };
        Ok(serde_yaml_ng::to_string(&raw)?)
    }

    fn validate(raw: RawAttributes) -> Result<Self, ParseError> {
        let text_size = raw
            .text_size
            .map(|size| {
                if size.is_finite() && size > 0.0 {
                    Ok(size)
                } else {
                    Err(ParseError::InvalidValue {
                        field: "text_size",
                        message: format!("must be a positive number, got {size}"),
                    })
                }
            })
            .transpose()?;

        Ok(Self {
            text_on: raw.text_on,
            text_off: raw.text_off,
            text_size,
            text_unit: raw.text_unit.unwrap_or_default(),
            checked: raw.checked,
            enabled: raw.enabled,
            on_background: parse_color("on_background", raw.on_background)?,
            off_background: parse_color("off_background", raw.off_background)?,
            thumb_background: parse_color("thumb_background", raw.thumb_background)?,
            on_text_color: parse_color("on_text_color", raw.on_text_color)?,
            off_text_color: parse_color("off_text_color", raw.off_text_color)?,
            test_id: raw.test_id,
        })
    }
}

fn parse_color(field: &'static str, value: Option<String>) -> Result<Option<Color>, ParseError> {
    value
        .map(|value| {
            Color::from_hex(&value).map_err(|source| ParseError::InvalidColor {
                field,
                value,
                source,
            })
        })
        .transpose()
}

/// Parse one attribute set.
pub fn parse_attributes(yaml: &str) -> Result<FlickAttributes, ParseError> {
    FlickAttributes::from_yaml(yaml)
}

/// Parse a mapping of names to attribute sets, sorted by name.
pub fn parse_sheet(yaml: &str) -> Result<BTreeMap<String, FlickAttributes>, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let raw: BTreeMap<String, Option<RawAttributes>> = serde_yaml_ng::from_str(yaml)?;
    raw.into_iter()
        .map(|(name, attrs)| Ok((name, FlickAttributes::validate(attrs.unwrap_or_default())?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_full_set() {
        let yaml = r##"
text_on: "Yes"
text_off: "No"
text_size: 18
text_unit: dp
checked: false
enabled: true
on_background: "#4caf50"
off_background: "#9e9e9e"
thumb_background: "#ffffff"
test_id: wifi-switch
"##;
        let attrs = parse_attributes(yaml).unwrap();
        assert_eq!(attrs.text_on.as_deref(), Some("Yes"));
        assert_eq!(attrs.text_off.as_deref(), Some("No"));
        assert_eq!(attrs.text_size, Some(18.0));
        assert_eq!(attrs.text_unit, TextUnit::Dip);
        assert_eq!(attrs.checked, Some(false));
        assert_eq!(attrs.enabled, Some(true));
        assert_eq!(attrs.on_background, Some(Color::rgb8(0x4c, 0xaf, 0x50)));
        assert_eq!(attrs.thumb_background, Some(Color::WHITE));
        assert_eq!(attrs.test_id.as_deref(), Some("wifi-switch"));
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_attributes("").unwrap(), FlickAttributes::default());
        assert_eq!(parse_attributes("  \n").unwrap(), FlickAttributes::default());
    }

    #[test]
    fn test_default_unit_is_sp() {
        let attrs = parse_attributes("text_size: 12").unwrap();
        assert_eq!(attrs.text_unit, TextUnit::Sp);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_attributes("text_middle: maybe").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
        assert!(err.to_string().contains("text_middle"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = parse_attributes("checked: sometimes").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let err = parse_attributes("off_background: \"#12345\"").unwrap_err();
        match err {
            ParseError::InvalidColor { field, value, source } => {
                assert_eq!(field, "off_background");
                assert_eq!(value, "#12345");
                assert_eq!(source, flick_core::ColorParseError::InvalidLength);
            }
            other => panic!("Expected InvalidColor, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_text_size_rejected() {
        for yaml in ["text_size: 0", "text_size: -4", "text_size: .nan", "text_size: .inf"] {
            let err = parse_attributes(yaml).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidValue { field: "text_size", .. }),
                "{yaml}: {err}"
            );
        }
    }

    #[test]
    fn test_to_yaml_round_trip() {
        let attrs = FlickAttributes {
            text_on: Some("Light".to_string()),
            text_off: Some("Dark".to_string()),
            text_size: Some(14.0),
            text_unit: TextUnit::Pt,
            checked: Some(true),
            off_background: Some(Color::rgb8(0x9e, 0x9e, 0x9e)),
            ..FlickAttributes::default()
        };
        let yaml = attrs.to_yaml().unwrap();
        assert!(yaml.contains("text_unit: pt"));
        assert!(!yaml.contains("enabled"));
        let back = parse_attributes(&yaml).unwrap();
        assert_eq!(back.text_on, attrs.text_on);
        assert_eq!(back.text_unit, TextUnit::Pt);
        assert_eq!(back.off_background.map(|c| c.to_hex()), Some("#9e9e9e".to_string()));
    }

    #[test]
    fn test_parse_sheet() {
        let yaml = r##"
wifi:
  text_on: "On"
  checked: true
bluetooth:
  text_off: "Off"
  enabled: false
airplane:
"##;
        let sheet = parse_sheet(yaml).unwrap();
        let names: Vec<&str> = sheet.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["airplane", "bluetooth", "wifi"]);
        assert_eq!(sheet["wifi"].checked, Some(true));
        assert_eq!(sheet["bluetooth"].enabled, Some(false));
        assert_eq!(sheet["airplane"], FlickAttributes::default());
    }

    #[test]
    fn test_parse_sheet_reports_bad_entry() {
        let yaml = "a:\n  on_background: red\n";
        let err = parse_sheet(yaml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidColor { field: "on_background", .. }));
    }

    proptest! {
        #[test]
        fn prop_labels_survive_parsing(on in "[A-Za-z0-9 ]{0,12}", off in "[A-Za-z0-9 ]{0,12}") {
            let yaml = format!("text_on: {on:?}\ntext_off: {off:?}\n");
            let attrs = parse_attributes(&yaml).unwrap();
            prop_assert_eq!(attrs.text_on.as_deref(), Some(on.as_str()));
            prop_assert_eq!(attrs.text_off.as_deref(), Some(off.as_str()));
        }
    }
}
