use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use console::style;
use fern::colors::{Color, ColoredLevelConfig};
use log::{Level, LevelFilter};
use ms::{__to_string__, ms};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub fn set_hook() {
    // setup a panic hook to easily exit the program on panic
    std::panic::set_hook(Box::new(|panic_info| {
        // print the panic message
        let message = if let Some(message) = panic_info.payload().downcast_ref::<String>() {
            message.clone()
        } else if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
            (*message).to_string()
        } else {
            format!("{panic_info:?}")
        };

        // add some color
        log::error!("{message}");

        #[cfg(debug_assertions)]
        log::debug!("{panic_info}");

        std::process::exit(1);
    }));
}

pub fn logs(verbose: bool) {
    let colors = ColoredLevelConfig::new()
        .info(Color::BrightCyan)
        .error(Color::BrightRed)
        .warn(Color::BrightYellow)
        .debug(Color::BrightWhite);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = record.level();

            match level {
                Level::Debug => out.finish(format_args!(
                    "{} [{}]: {}",
                    colors.color(Level::Debug).to_string().to_lowercase(),
                    record.target(),
                    message
                )),

                level => out.finish(format_args!(
                    "{}: {}",
                    colors.color(level).to_string().to_lowercase(),
                    message
                )),
            }
        })
        .level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        // reqwest and friends are noisy on debug
        .level_for("hyper", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn)
        .chain(
            fern::Dispatch::new()
                .filter(|metadata| !matches!(metadata.level(), Level::Error | Level::Warn))
                .chain(std::io::stdout()),
        )
        .chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Warn)
                .chain(std::io::stderr()),
        )
        .apply()
        .ok();
}

pub fn relative_time(date: DateTime<Utc>) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default();

    ms!((now - date.timestamp_millis()).unsigned_abs(), true)
}

pub fn ask_question_iter<T>(prompt: &str, choices: &[T], override_default: Option<T>) -> Result<T>
where
    T: PartialEq + Clone + Serialize + Default,
{
    let choices_txt: Vec<String> = choices
        .iter()
        .map(|c| {
            serde_json::to_string(c)
                .unwrap_or_default()
                .replace('"', "")
        })
        .collect();

    let to_compare = override_default.unwrap_or_default();

    let choice = dialoguer::Select::new()
        .with_prompt(prompt)
        .default(choices.iter().position(|x| x == &to_compare).unwrap_or(0))
        .items(&choices_txt)
        .interact()?;

    Ok(choices[choice].clone())
}

pub fn urlify(s: &str) -> String {
    style(s).bold().underlined().to_string()
}

/// Accepts RFC 3339 timestamps as well as the naive ISO form the API
/// emits for database rows, which are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// IDs are integers on the user platform and strings on the lab backend.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(id) => id.to_string(),
        Id::Text(id) => id,
    })
}

/// Flattens nested JSON into `dotted.key = value` pairs.
pub fn flatten_json(value: &Value) -> Vec<(String, String)> {
    fn walk(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
        let join = |key: &str| {
            if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{prefix}.{key}")
            }
        };

        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    walk(&join(key), value, out);
                }
            }

            Value::Array(items) => {
                for (idx, value) in items.iter().enumerate() {
                    walk(&join(&idx.to_string()), value, out);
                }
            }

            Value::String(s) => out.push((prefix.to_string(), s.clone())),
            Value::Null => out.push((prefix.to_string(), "-".to_string())),
            other => out.push((prefix.to_string(), other.to_string())),
        }
    }

    let mut out = vec![];
    walk("", value, &mut out);
    out
}

#[cfg(test)]
mod test {
    use chrono::Timelike;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let date = parse_timestamp("2024-03-01T10:20:30Z").unwrap();
        assert_eq!(date.hour(), 10);

        let date = parse_timestamp("2024-03-01T12:20:30+02:00").unwrap();
        assert_eq!(date.hour(), 10);

        let date = parse_timestamp("2024-03-01T10:20:30.123456").unwrap();
        assert_eq!(date.minute(), 20);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_deserialize_id() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "deserialize_id")]
            id: String,
        }

        let row: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(row.id, "42");

        let row: Row = serde_json::from_str(r#"{"id": "ai-lab-jupyter-1"}"#).unwrap();
        assert_eq!(row.id, "ai-lab-jupyter-1");
    }

    #[test]
    fn test_flatten_json() {
        let flat = flatten_json(&json!({
            "gpus": { "rtx-3090": { "available": 2 } },
            "nodes": ["node-a"],
            "note": null,
        }));

        assert!(flat.contains(&("gpus.rtx-3090.available".to_string(), "2".to_string())));
        assert!(flat.contains(&("nodes.0".to_string(), "node-a".to_string())));
        assert!(flat.contains(&("note".to_string(), "-".to_string())));
    }
}
