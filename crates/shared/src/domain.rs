use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(AttemptId);

/// Damage severity reported by the assessment service.
///
/// The service is free to grow new labels; anything this client does not
/// recognize deserializes as `Unknown` instead of failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DamageLevel {
    Minor,
    Moderate,
    Severe,
    ModelError,
    Unknown,
}

impl DamageLevel {
    pub fn wire_name(self) -> &'static str {
        match self {
            DamageLevel::Minor => "minor",
            DamageLevel::Moderate => "moderate",
            DamageLevel::Severe => "severe",
            DamageLevel::ModelError => "model_error",
            DamageLevel::Unknown => "unknown",
        }
    }
}

impl From<String> for DamageLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "minor" => DamageLevel::Minor,
            "moderate" => DamageLevel::Moderate,
            "severe" => DamageLevel::Severe,
            "model_error" => DamageLevel::ModelError,
            _ => DamageLevel::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_round_trip_through_wire_names() {
        for level in [
            DamageLevel::Minor,
            DamageLevel::Moderate,
            DamageLevel::Severe,
            DamageLevel::ModelError,
            DamageLevel::Unknown,
        ] {
            assert_eq!(DamageLevel::from(level.wire_name().to_string()), level);
        }
    }

    #[test]
    fn unrecognized_level_falls_back_to_unknown() {
        assert_eq!(DamageLevel::from("foo".to_string()), DamageLevel::Unknown);
        assert_eq!(DamageLevel::from(String::new()), DamageLevel::Unknown);
    }

    #[test]
    fn deserializes_lenient_from_json_string() {
        let severe: DamageLevel = serde_json::from_str("\"severe\"").expect("severe");
        assert_eq!(severe, DamageLevel::Severe);

        let surprise: DamageLevel = serde_json::from_str("\"totaled\"").expect("lenient");
        assert_eq!(surprise, DamageLevel::Unknown);
    }

    #[test]
    fn serializes_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&DamageLevel::ModelError).expect("json"),
            "\"model_error\""
        );
    }
}
