// ABOUTME: Requested-session settings map for admin custom IDE launches

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single settings field value. The admin settings form is generic over
/// field names; the only thing it needs to know is whether a field holds
/// text or a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Text(String),
}

impl SettingValue {
    pub fn is_flag(&self) -> bool {
        matches!(self, SettingValue::Flag(_))
    }

    /// Display form for the settings form and json-less CLI output.
    pub fn display(&self) -> String {
        match self {
            SettingValue::Flag(v) => v.to_string(),
            SettingValue::Text(v) => v.clone(),
        }
    }
}

/// Edit applied to one settings field through [`IdeSettings::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingEdit {
    /// Replace a text field's value.
    Text(String),
    /// Flip a flag field.
    Toggle,
}

/// Free-form key/value map describing a requested session configuration.
///
/// Known fields (the server owns the authoritative list and may normalize
/// or default them on initialize): `image`, `repo_url`, `resources`,
/// `network_locked`, `network_policy`, `privileged`, `autosave`,
/// `credentials`, `persistent_storage`, `admin`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeSettings(pub BTreeMap<String, SettingValue>);

impl IdeSettings {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&SettingValue> {
        self.0.get(field)
    }

    /// Field names in stable (sorted) order, for form rendering.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }

    pub fn set(&mut self, field: impl Into<String>, value: SettingValue) {
        self.0.insert(field.into(), value);
    }

    /// Pure reducer for form edits: produces a new map, never mutates the
    /// previous one. Edits to unknown fields are ignored, and an edit kind
    /// that does not match the field's type is a no-op, matching how the
    /// form treats fields generically by inferred type.
    pub fn reduce(&self, field: &str, edit: &SettingEdit) -> IdeSettings {
        let mut next = self.0.clone();
        match (next.get(field), edit) {
            (Some(SettingValue::Text(_)), SettingEdit::Text(value)) => {
                next.insert(field.to_string(), SettingValue::Text(value.clone()));
            }
            (Some(SettingValue::Flag(current)), SettingEdit::Toggle) => {
                let flipped = !*current;
                next.insert(field.to_string(), SettingValue::Flag(flipped));
            }
            _ => {}
        }
        IdeSettings(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IdeSettings {
        let mut settings = IdeSettings::default();
        settings.set("image", SettingValue::Text("registry.digitalocean.com/anubis/theia-admin".into()));
        settings.set("autosave", SettingValue::Flag(true));
        settings
    }

    #[test]
    fn reduce_replaces_text_without_touching_source() {
        let before = sample();
        let after = before.reduce("image", &SettingEdit::Text("theia-base".into()));

        assert_eq!(
            after.get("image"),
            Some(&SettingValue::Text("theia-base".into()))
        );
        assert_eq!(
            before.get("image"),
            Some(&SettingValue::Text(
                "registry.digitalocean.com/anubis/theia-admin".into()
            ))
        );
    }

    #[test]
    fn reduce_toggles_flags() {
        let settings = sample();
        let toggled = settings.reduce("autosave", &SettingEdit::Toggle);
        assert_eq!(toggled.get("autosave"), Some(&SettingValue::Flag(false)));

        let toggled_back = toggled.reduce("autosave", &SettingEdit::Toggle);
        assert_eq!(toggled_back.get("autosave"), Some(&SettingValue::Flag(true)));
    }

    #[test]
    fn reduce_ignores_unknown_fields_and_mismatched_edits() {
        let settings = sample();
        assert_eq!(settings.reduce("nope", &SettingEdit::Toggle), settings);
        assert_eq!(settings.reduce("image", &SettingEdit::Toggle), settings);
        assert_eq!(
            settings.reduce("autosave", &SettingEdit::Text("x".into())),
            settings
        );
    }

    #[test]
    fn settings_deserialize_mixed_types() {
        let settings: IdeSettings = serde_json::from_str(
            r#"{"image": "theia-base", "network_locked": true, "privileged": false}"#,
        )
        .unwrap();

        assert_eq!(settings.len(), 3);
        assert_eq!(
            settings.get("network_locked"),
            Some(&SettingValue::Flag(true))
        );
        assert!(!settings.get("image").unwrap().is_flag());
    }
}
