use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the `completed_clips` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub id: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transcript: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub audio_url: String,
    /// Clip length in seconds
    #[serde(rename = "duration", default)]
    pub duration_seconds: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub voice_id: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub scheduled_clip_id: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl UpdateRecord {
    /// Transcript paragraphs, one per non-blank line.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.transcript
            .lines()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// e.g. "May 9, 2025"
    pub fn display_date(&self) -> String {
        self.created_at.format("%B %-d, %Y").to_string()
    }

    /// e.g. "3:07 PM"
    pub fn display_time(&self) -> String {
        self.created_at.format("%-I:%M %p").to_string()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339, or a bare `timestamp` column value which is taken as UTC.
fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row_json() -> serde_json::Value {
        serde_json::json!({
            "id": "7f1c",
            "created_at": "2025-05-09T15:07:42.123+00:00",
            "name": "Pope Updates",
            "transcript": "First paragraph.\n\n  Second paragraph.  \n",
            "audio_url": "clip1.mp3",
            "duration": 42.5,
            "language": "en",
            "voice_id": "v1",
            "created_by": null,
            "scheduled_clip_id": "sched-1",
            "genre": null
        })
    }

    #[test]
    fn decodes_a_table_row() {
        let record: UpdateRecord = serde_json::from_value(row_json()).unwrap();
        assert_eq!(record.id, "7f1c");
        assert_eq!(record.duration_seconds, 42.5);
        assert_eq!(record.created_by, None);
        assert_eq!(record.scheduled_clip_id.as_deref(), Some("sched-1"));
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2025, 5, 9, 15, 7, 42).unwrap()
                + chrono::Duration::milliseconds(123)
        );
    }

    #[test]
    fn null_audio_url_reads_as_empty() {
        let mut row = row_json();
        row["audio_url"] = serde_json::Value::Null;
        let record: UpdateRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.audio_url, "");
    }

    #[test]
    fn timestamp_without_offset_is_utc() {
        let parsed = parse_timestamp("2025-05-09T15:07:42").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 5, 9, 15, 7, 42).unwrap());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn paragraphs_skip_blank_lines() {
        let record: UpdateRecord = serde_json::from_value(row_json()).unwrap();
        assert_eq!(record.paragraphs(), vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn display_formats() {
        let record: UpdateRecord = serde_json::from_value(row_json()).unwrap();
        assert_eq!(record.display_date(), "May 9, 2025");
        assert_eq!(record.display_time(), "3:07 PM");
    }
}
