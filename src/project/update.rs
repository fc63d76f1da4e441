//! Tagged field updates for panels.
//!
//! A `PanelUpdate` names exactly one mutable panel field and its new value.
//! Structural fields (`id`, `order`) belong to the manager and have no variant.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::Panel;
use crate::error::{FlowError, FlowResult};

/// A single-field change to a panel.
///
/// Serializes as `{"field": "dialogue", "value": "..."}` using the panel's
/// JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PanelUpdate {
    ImageData(String),
    ActionNotes(String),
    Dialogue(String),
    ShotType(String),
    CameraAngle(String),
    CameraMove(String),
    Duration(f64),
    CharacterIds(Vec<String>),
}

impl PanelUpdate {
    /// Every field name accepted by `from_field`.
    pub const FIELDS: [&'static str; 8] = [
        "image_data",
        "action_notes",
        "dialogue",
        "shot_type",
        "camera_angle",
        "camera_move",
        "duration",
        "character_ids",
    ];

    /// Builds an update from an untyped field name and JSON value, as sent by
    /// a UI binding.
    pub fn from_field(field: &str, value: Value) -> FlowResult<Self> {
        let text = |value: &Value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| FlowError::invalid_field_value(field, "string"))
        };

        match field {
            "image_data" => Ok(Self::ImageData(text(&value)?)),
            "action_notes" => Ok(Self::ActionNotes(text(&value)?)),
            "dialogue" => Ok(Self::Dialogue(text(&value)?)),
            "shot_type" => Ok(Self::ShotType(text(&value)?)),
            "camera_angle" => Ok(Self::CameraAngle(text(&value)?)),
            "camera_move" => Ok(Self::CameraMove(text(&value)?)),
            "duration" => value
                .as_f64()
                .map(Self::Duration)
                .ok_or_else(|| FlowError::invalid_field_value(field, "number")),
            "character_ids" => {
                let items = value
                    .as_array()
                    .ok_or_else(|| FlowError::invalid_field_value(field, "array of strings"))?;
                // Non-string entries are dropped rather than rejected.
                let ids = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                Ok(Self::CharacterIds(ids))
            }
            other => Err(FlowError::unknown_field(other)),
        }
    }

    /// JSON key of the field this update changes.
    pub fn field(&self) -> &'static str {
        match self {
            Self::ImageData(_) => "image_data",
            Self::ActionNotes(_) => "action_notes",
            Self::Dialogue(_) => "dialogue",
            Self::ShotType(_) => "shot_type",
            Self::CameraAngle(_) => "camera_angle",
            Self::CameraMove(_) => "camera_move",
            Self::Duration(_) => "duration",
            Self::CharacterIds(_) => "character_ids",
        }
    }

    /// Rejects values a project file could not store, such as a NaN duration.
    pub fn validate(&self) -> FlowResult<()> {
        match self {
            Self::Duration(v) if !v.is_finite() => Err(FlowError::invalid_field_value(
                "duration",
                "finite number",
            )),
            _ => Ok(()),
        }
    }

    /// Writes the new value into `panel`.
    pub fn apply(self, panel: &mut Panel) {
        match self {
            Self::ImageData(v) => panel.image_data = v,
            Self::ActionNotes(v) => panel.action_notes = v,
            Self::Dialogue(v) => panel.dialogue = v,
            Self::ShotType(v) => panel.shot_type = v,
            Self::CameraAngle(v) => panel.camera_angle = v,
            Self::CameraMove(v) => panel.camera_move = v,
            Self::Duration(v) => panel.duration = v,
            Self::CharacterIds(v) => panel.character_ids = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_field_accepts_every_known_field() {
        for field in PanelUpdate::FIELDS {
            let value = match field {
                "duration" => json!(2.5),
                "character_ids" => json!(["a", "b"]),
                _ => json!("text"),
            };
            let update = PanelUpdate::from_field(field, value).unwrap();
            assert_eq!(update.field(), field);
        }
    }

    #[test]
    fn test_from_field_rejects_unknown_and_structural_fields() {
        for field in ["id", "order", "colour"] {
            let err = PanelUpdate::from_field(field, json!("x")).unwrap_err();
            assert!(matches!(err, FlowError::UnknownField(ref f) if f == field));
        }
    }

    #[test]
    fn test_from_field_type_mismatch() {
        let err = PanelUpdate::from_field("duration", json!("long")).unwrap_err();
        assert!(matches!(err, FlowError::InvalidFieldValue { .. }));

        let err = PanelUpdate::from_field("dialogue", json!(12)).unwrap_err();
        assert!(matches!(err, FlowError::InvalidFieldValue { .. }));

        let err = PanelUpdate::from_field("character_ids", json!("c1")).unwrap_err();
        assert!(matches!(err, FlowError::InvalidFieldValue { .. }));
    }

    #[test]
    fn test_integer_duration_accepted() {
        let update = PanelUpdate::from_field("duration", json!(4)).unwrap();
        assert_eq!(update, PanelUpdate::Duration(4.0));
    }

    #[test]
    fn test_character_ids_skip_non_strings() {
        let update = PanelUpdate::from_field("character_ids", json!(["a", 1, null, "b"])).unwrap();
        assert_eq!(
            update,
            PanelUpdate::CharacterIds(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_duration() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = PanelUpdate::Duration(bad).validate().unwrap_err();
            assert!(matches!(
                err,
                FlowError::InvalidFieldValue { ref field, ref expected }
                    if field == "duration" && expected == "finite number"
            ));
        }
        assert!(PanelUpdate::Duration(0.0).validate().is_ok());
        assert!(PanelUpdate::Dialogue(String::new()).validate().is_ok());
    }

    #[test]
    fn test_apply() {
        let mut panel = Panel::new(3);
        let id = panel.id.clone();

        PanelUpdate::Dialogue("Run!".into()).apply(&mut panel);
        PanelUpdate::CameraMove("Dolly".into()).apply(&mut panel);
        PanelUpdate::Duration(0.5).apply(&mut panel);

        assert_eq!(panel.dialogue, "Run!");
        assert_eq!(panel.camera_move, "Dolly");
        assert_eq!(panel.duration, 0.5);
        assert_eq!(panel.id, id);
        assert_eq!(panel.order, 3);
    }

    #[test]
    fn test_serde_shape() {
        let update = PanelUpdate::ShotType("Wide".into());
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, json!({"field": "shot_type", "value": "Wide"}));

        let parsed: PanelUpdate =
            serde_json::from_value(json!({"field": "duration", "value": 1.25})).unwrap();
        assert_eq!(parsed, PanelUpdate::Duration(1.25));
    }
}
