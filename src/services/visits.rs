//! Visit check-ins and the caller's visit history.

use crate::db::{new_id, MemoryDb};
use crate::error::AppError;
use crate::models::Visit;
use crate::services::pagination::{paginate, Page, PageParams};
use crate::time_utils::{format_utc_rfc3339, parse_rfc3339};
use chrono::Utc;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Body of `POST /api/visits`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewVisit {
    #[validate(length(min = 1))]
    pub cafe_id: String,
    /// RFC3339; defaults to the request time
    pub visit_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct VisitView {
    pub id: String,
    pub cafe_id: String,
    pub user_id: String,
    pub visit_time: String,
    pub created_at: String,
}

/// History entry with the café's display fields.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct VisitHistoryEntry {
    pub id: String,
    pub cafe_id: String,
    pub cafe_name: String,
    pub cafe_image: String,
    pub visit_time: String,
    pub created_at: String,
}

#[derive(Clone)]
pub struct VisitService {
    db: MemoryDb,
}

impl VisitService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    /// Record a visit and update the busy-time bucket for its hour.
    pub fn create(&self, user_id: &str, input: NewVisit) -> Result<VisitView, AppError> {
        input.validate()?;
        let now = Utc::now();
        let visit_time = match input.visit_time.as_deref() {
            Some(raw) => parse_rfc3339(raw).ok_or_else(|| {
                AppError::Validation("visitTime must be an RFC3339 timestamp".to_string())
            })?,
            None => now,
        };

        let visit = self.db.record_visit_atomic(Visit {
            id: new_id("visit"),
            user_id: user_id.to_string(),
            cafe_id: input.cafe_id,
            visit_time,
            created_at: now,
        })?;

        tracing::info!(
            visit_id = %visit.id,
            cafe_id = %visit.cafe_id,
            user_id,
            "Visit recorded"
        );
        Ok(VisitView {
            id: visit.id,
            cafe_id: visit.cafe_id,
            user_id: visit.user_id,
            visit_time: format_utc_rfc3339(visit.visit_time),
            created_at: format_utc_rfc3339(visit.created_at),
        })
    }

    /// The user's visits, most recent `visit_time` first.
    pub fn by_user(
        &self,
        user_id: &str,
        page: PageParams,
    ) -> Result<Page<VisitHistoryEntry>, AppError> {
        page.validate()?;
        Ok(self.db.read(|t| {
            let mut visits = t.visits_by_user(user_id);
            visits.sort_by(|a, b| {
                b.visit_time
                    .cmp(&a.visit_time)
                    .then_with(|| b.id.cmp(&a.id))
            });
            let page = paginate(visits, page);
            Page {
                items: page
                    .items
                    .into_iter()
                    .map(|v| {
                        let (cafe_name, cafe_image) = t.cafe_label(&v.cafe_id);
                        VisitHistoryEntry {
                            id: v.id.clone(),
                            cafe_id: v.cafe_id.clone(),
                            cafe_name,
                            cafe_image,
                            visit_time: format_utc_rfc3339(v.visit_time),
                            created_at: format_utc_rfc3339(v.created_at),
                        }
                    })
                    .collect(),
                total: page.total,
                has_more: page.has_more,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SeedData;

    fn service() -> (MemoryDb, VisitService) {
        let db = MemoryDb::new();
        SeedData::load_from_file("data/seed.json").unwrap().apply(&db);
        (db.clone(), VisitService::new(db))
    }

    #[test]
    fn test_explicit_visit_time_picks_bucket() {
        let (db, visits) = service();
        let view = visits
            .create(
                "user-1",
                NewVisit {
                    cafe_id: "cafe-3".to_string(),
                    // Wednesday 03:00 UTC; no seeded bucket at that hour
                    visit_time: Some("2024-10-30T03:10:00Z".to_string()),
                },
            )
            .unwrap();
        assert_eq!(view.visit_time, "2024-10-30T03:10:00.000Z");

        let bucket = db
            .read(|t| t.busy_times.get("busy-cafe-3-3-3").cloned())
            .unwrap();
        assert_eq!(bucket.sample_count, 1);
        assert_eq!(bucket.busy_level, 50);
    }

    #[test]
    fn test_visit_reuses_seeded_bucket_with_foreign_id() {
        let (db, visits) = service();
        SeedData::load_from_json(
            r#"{
                "busy_times": [{
                    "id": "bt-1",
                    "cafe_id": "cafe-3",
                    "day_of_week": 3,
                    "hour": 3,
                    "busy_level": 35,
                    "sample_count": 2,
                    "updated_at": "2024-10-28T00:00:00Z"
                }]
            }"#,
        )
        .unwrap()
        .apply(&db);

        visits
            .create(
                "user-1",
                NewVisit {
                    cafe_id: "cafe-3".to_string(),
                    visit_time: Some("2024-10-30T03:10:00Z".to_string()),
                },
            )
            .unwrap();

        let slot: Vec<(u8, u32)> = db.read(|t| {
            t.busy_times
                .find(|b| b.cafe_id == "cafe-3" && b.day_of_week == 3 && b.hour == 3)
                .into_iter()
                .map(|b| (b.busy_level, b.sample_count))
                .collect()
        });
        assert_eq!(slot, vec![(35, 3)]);
    }

    #[test]
    fn test_bad_visit_time_is_validation_error() {
        let (db, visits) = service();
        let err = visits
            .create(
                "user-1",
                NewVisit {
                    cafe_id: "cafe-1".to_string(),
                    visit_time: Some("last tuesday".to_string()),
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(db.read(|t| t.visits.len()), 2);
    }

    #[test]
    fn test_history_is_newest_first_and_enriched() {
        let (_, visits) = service();
        let page = visits.by_user("user-1", PageParams::default()).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].id, "visit-1");
        assert_eq!(page.items[0].cafe_name, "The Brew Lab");
        assert!(!page.has_more);
    }
}
