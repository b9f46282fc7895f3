//! # CSV Activity Repository
//!
//! All activities live in one `activities.csv`:
//!
//! ```csv
//! id,user_id,name,description,points,status,date,created_at
//! activity::9a1e...,user::2f1c...,Make the bed,,10,pending_approval,2025-03-10,2025-03-10T08:00:00+00:00
//! ```
//!
//! The header row is always written, even for an empty collection.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::models::activity::{Activity, ActivityStatus};
use crate::storage::traits::ActivityStorage;

const HEADER: [&str; 8] = [
    "id",
    "user_id",
    "name",
    "description",
    "points",
    "status",
    "date",
    "created_at",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActivityRecord {
    id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    points: u32,
    status: String,
    date: String,
    created_at: String,
}

impl From<&Activity> for ActivityRecord {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            user_id: activity.user_id.clone(),
            name: activity.name.clone(),
            description: activity.description.clone(),
            points: activity.points,
            status: activity.status.as_str().to_string(),
            date: activity.date.format(DATE_FORMAT).to_string(),
            created_at: activity.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = anyhow::Error;

    fn try_from(record: ActivityRecord) -> Result<Self> {
        let status = ActivityStatus::from_string(&record.status)
            .map_err(|e| anyhow!("{} (activity {})", e, record.id))?;
        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT)
            .with_context(|| format!("Invalid date '{}' for activity {}", record.date, record.id))?;
        let created_at = DateTime::parse_from_rfc3339(&record.created_at)
            .with_context(|| format!("Invalid created_at for activity {}", record.id))?
            .with_timezone(&Utc);

        Ok(Activity {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            description: record.description.filter(|text| !text.is_empty()),
            points: record.points,
            status,
            date,
            created_at,
        })
    }
}

#[derive(Clone)]
pub struct ActivityRepository {
    connection: Arc<CsvConnection>,
}

impl ActivityRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ActivityStorage for ActivityRepository {
    async fn load_activities(&self) -> Result<Vec<Activity>> {
        let path = self.connection.activities_file_path();
        if !path.exists() {
            debug!("No activities file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut activities = Vec::new();
        for (index, result) in reader.deserialize::<ActivityRecord>().enumerate() {
            // +2: one for the header, one for 1-based lines
            let record = result.with_context(|| format!("Malformed activity on line {}", index + 2))?;
            activities.push(Activity::try_from(record)?);
        }

        debug!("Loaded {} activities", activities.len());
        Ok(activities)
    }

    async fn save_activities(&self, activities: &[Activity]) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        writer.write_record(HEADER)?;
        for activity in activities {
            writer.serialize(ActivityRecord::from(activity))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush activities CSV: {}", e))?;

        self.connection
            .write_atomically(&self.connection.activities_file_path(), &bytes)?;

        info!("Saved {} activities", activities.len());
        Ok(())
    }
}
