// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business promotions.

use crate::db::{new_id, MemoryDb, Tables};
use crate::error::AppError;
use crate::models::Promotion;
use crate::time_utils::{format_utc_rfc3339, parse_rfc3339};
use chrono::Utc;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Body of `POST /api/promotions`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPromotion {
    #[validate(length(min = 1))]
    pub cafe_id: String,
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    pub image: Option<String>,
    /// RFC3339
    pub start_date: String,
    /// RFC3339, not before `start_date`
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PromotionView {
    pub id: String,
    pub business_id: String,
    pub cafe_id: String,
    /// Only present on the owner's listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cafe_name: Option<String>,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub created_at: String,
}

impl PromotionView {
    fn from_promotion(promo: &Promotion, cafe_name: Option<String>) -> Self {
        Self {
            id: promo.id.clone(),
            business_id: promo.business_id.clone(),
            cafe_id: promo.cafe_id.clone(),
            cafe_name,
            title: promo.title.clone(),
            description: promo.description.clone(),
            image: promo.image.clone(),
            start_date: format_utc_rfc3339(promo.start_date),
            end_date: format_utc_rfc3339(promo.end_date),
            is_active: promo.is_active,
            created_at: format_utc_rfc3339(promo.created_at),
        }
    }
}

fn parse_date(field: &str, raw: &str) -> Result<chrono::DateTime<Utc>, AppError> {
    parse_rfc3339(raw).ok_or_else(|| {
        AppError::Validation(format!("{} must be an RFC3339 timestamp", field))
    })
}

#[derive(Clone)]
pub struct PromotionService {
    db: MemoryDb,
}

impl PromotionService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    /// Create an active promotion for a café the caller owns.
    pub fn create(&self, user_id: &str, input: NewPromotion) -> Result<PromotionView, AppError> {
        input.validate()?;
        let start_date = parse_date("startDate", &input.start_date)?;
        let end_date = parse_date("endDate", &input.end_date)?;
        if end_date < start_date {
            return Err(AppError::Validation(
                "endDate must not be before startDate".to_string(),
            ));
        }

        let now = Utc::now();
        let promo = self.db.write(|t| {
            t.require_owned_cafe(user_id, &input.cafe_id, "create promotions")?;
            let promo = Promotion {
                id: new_id("promo"),
                business_id: user_id.to_string(),
                cafe_id: input.cafe_id,
                title: input.title,
                description: input.description,
                image: input.image,
                start_date,
                end_date,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            t.promotions.set(promo.clone());
            Ok::<_, AppError>(promo)
        })?;

        tracing::info!(
            promotion_id = %promo.id,
            cafe_id = %promo.cafe_id,
            business_id = user_id,
            "Promotion created"
        );
        Ok(PromotionView::from_promotion(&promo, None))
    }

    /// Promotions currently running at a café.
    pub fn by_cafe(&self, cafe_id: &str) -> Vec<PromotionView> {
        let now = Utc::now();
        self.db.read(|t| {
            let mut running: Vec<&Promotion> = t
                .active_promotions_for_cafe(cafe_id)
                .into_iter()
                .filter(|p| p.is_running(now))
                .collect();
            running.sort_by(|a, b| a.start_date.cmp(&b.start_date));
            running
                .into_iter()
                .map(|p| PromotionView::from_promotion(p, None))
                .collect()
        })
    }

    /// Every promotion owned by a business account, newest first.
    pub fn by_business(&self, user_id: &str) -> Result<Vec<PromotionView>, AppError> {
        self.db.read(|t| {
            if !t.require_user(user_id)?.is_business {
                return Err(AppError::Forbidden(
                    "Only business accounts can access this endpoint".to_string(),
                ));
            }
            let mut owned = t.promotions_by_business(user_id);
            owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(owned
                .into_iter()
                .map(|p| enrich(p, t))
                .collect())
        })
    }
}

fn enrich(promo: &Promotion, tables: &Tables) -> PromotionView {
    PromotionView::from_promotion(promo, Some(tables.cafe_label(&promo.cafe_id).0))
}
