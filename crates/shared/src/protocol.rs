use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DamageLevel;

/// Successful body of `POST /api/assess`.
///
/// The service omits `confidence` when the model could not score the image;
/// rendering treats a missing value as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    #[serde(default)]
    pub image_path: String,
    pub damage_level: DamageLevel,
    #[serde(default)]
    pub confidence: f32,
}

/// Exported report payload. Fields mirror what the results view displays,
/// not the raw wire response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub timestamp: DateTime<Utc>,
    pub damage_level: String,
    pub confidence: String,
    pub recommendations: Vec<String>,
}

pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("damage-assessment-report-{}.json", now.timestamp_millis())
}

/// Rewrites the server-reported storage path into the public URL path the
/// static asset route serves it under.
///
/// The service stores uploads on its own filesystem and reports that path
/// verbatim, with whichever separator its host uses. Everything up to and
/// including the last `uploads` directory segment collapses into `/uploads/`;
/// paths without an `uploads` segment pass through unchanged.
pub fn public_image_url(image_path: &str) -> String {
    if image_path.is_empty() {
        return String::new();
    }

    let segments: Vec<&str> = image_path.split(['/', '\\']).collect();
    match segments.iter().rposition(|segment| *segment == "uploads") {
        Some(idx) if idx + 1 < segments.len() => {
            format!("/uploads/{}", segments[idx + 1..].join("/"))
        }
        _ => image_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_unix_storage_path() {
        assert_eq!(
            public_image_url("/srv/app/uploads/crash-42.jpg"),
            "/uploads/crash-42.jpg"
        );
    }

    #[test]
    fn rewrites_windows_storage_path() {
        assert_eq!(
            public_image_url("C:\\service\\uploads\\crash-42.jpg"),
            "/uploads/crash-42.jpg"
        );
    }

    #[test]
    fn keeps_only_the_tail_after_the_last_uploads_segment() {
        assert_eq!(
            public_image_url("/data/uploads/archive/uploads/front.png"),
            "/uploads/front.png"
        );
    }

    #[test]
    fn passes_through_paths_without_an_uploads_segment() {
        assert_eq!(public_image_url("/tmp/front.png"), "/tmp/front.png");
        assert_eq!(public_image_url(""), "");
    }

    #[test]
    fn decodes_response_with_missing_confidence_as_zero() {
        let response: AssessmentResponse =
            serde_json::from_str(r#"{"imagePath":"/x/uploads/a.jpg","damageLevel":"minor"}"#)
                .expect("response");
        assert_eq!(response.damage_level, DamageLevel::Minor);
        assert_eq!(response.confidence, 0.0);
    }

    #[test]
    fn decodes_unrecognized_damage_level_as_unknown() {
        let response: AssessmentResponse =
            serde_json::from_str(r#"{"imagePath":"","damageLevel":"foo","confidence":0.5}"#)
                .expect("response");
        assert_eq!(response.damage_level, DamageLevel::Unknown);
    }

    #[test]
    fn report_file_name_embeds_epoch_millis() {
        let now = "2026-08-05T12:00:00Z".parse::<DateTime<Utc>>().expect("timestamp");
        assert_eq!(
            report_file_name(now),
            format!("damage-assessment-report-{}.json", now.timestamp_millis())
        );
    }

    #[test]
    fn report_serializes_displayed_fields_camel_case() {
        let report = AssessmentReport {
            timestamp: "2026-08-05T12:00:00Z".parse().expect("timestamp"),
            damage_level: "Severe Damage".to_string(),
            confidence: "87%".to_string(),
            recommendations: vec!["Do not drive the vehicle".to_string()],
        };

        let json = serde_json::to_string(&report).expect("json");
        assert!(json.contains("\"damageLevel\":\"Severe Damage\""));
        assert!(json.contains("\"confidence\":\"87%\""));

        let back: AssessmentReport = serde_json::from_str(&json).expect("round trip");
        assert_eq!(back, report);
    }
}
