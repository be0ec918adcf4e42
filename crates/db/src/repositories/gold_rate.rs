//! Gold rate repository for snapshot database operations.
//!
//! A snapshot carries all nine figures for one release timestamp. The
//! release timestamp is unique across the table, so publishing twice for
//! the same minute is rejected rather than silently overwritten.

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use aurum_core::rates::{RateSheet, RateTriple};

use crate::entities::gold_rates;

/// Error types for gold rate operations.
#[derive(Debug, thiserror::Error)]
pub enum GoldRateError {
    /// A snapshot already exists for the requested release timestamp.
    #[error("A rate already exists for this date and time")]
    DuplicateReleaseTimestamp,

    /// Snapshot not found.
    #[error("Gold rate not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a gold rate snapshot.
#[derive(Debug, Clone, Copy)]
pub struct CreateGoldRateInput {
    /// When the snapshot becomes visible to the public read API.
    pub release_datetime: NaiveDateTime,
    /// The nine figures.
    pub sheet: RateSheet,
}

/// Gold rate repository for CRUD and read-path queries.
#[derive(Debug, Clone)]
pub struct GoldRateRepository {
    db: DatabaseConnection,
}

impl GoldRateRepository {
    /// Creates a new gold rate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a snapshot for a release timestamp nothing else occupies.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateReleaseTimestamp` when a snapshot already exists
    /// for the timestamp, either from the pre-check or from the unique
    /// constraint when two writers race past it.
    pub async fn create(
        &self,
        input: CreateGoldRateInput,
    ) -> Result<gold_rates::Model, GoldRateError> {
        let existing = gold_rates::Entity::find()
            .filter(gold_rates::Column::ReleaseDatetime.eq(input.release_datetime))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(GoldRateError::DuplicateReleaseTimestamp);
        }

        let snapshot = active_model_for(Uuid::new_v4(), input.release_datetime, input.sheet);

        match snapshot.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(GoldRateError::DuplicateReleaseTimestamp)
                }
                _ => Err(err.into()),
            },
        }
    }

    /// Replaces the nine figures of an existing snapshot.
    ///
    /// The release timestamp and id are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no snapshot has the id.
    pub async fn update_sheet(
        &self,
        id: Uuid,
        sheet: RateSheet,
    ) -> Result<gold_rates::Model, GoldRateError> {
        let existing = gold_rates::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(GoldRateError::NotFound)?;

        let mut active: gold_rates::ActiveModel = existing.into();
        set_sheet(&mut active, sheet);

        Ok(active.update(&self.db).await?)
    }

    /// Replaces a snapshot's release timestamp and figures.
    ///
    /// The duplicate check excludes the snapshot itself, so saving the
    /// edit form without moving the timestamp succeeds.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no snapshot has the id, and
    /// `DuplicateReleaseTimestamp` when another snapshot already
    /// occupies the requested timestamp.
    pub async fn update(
        &self,
        id: Uuid,
        release_datetime: NaiveDateTime,
        sheet: RateSheet,
    ) -> Result<gold_rates::Model, GoldRateError> {
        let existing = gold_rates::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(GoldRateError::NotFound)?;

        let taken = gold_rates::Entity::find()
            .filter(gold_rates::Column::ReleaseDatetime.eq(release_datetime))
            .filter(gold_rates::Column::Id.ne(id))
            .one(&self.db)
            .await?;
        if taken.is_some() {
            return Err(GoldRateError::DuplicateReleaseTimestamp);
        }

        let mut active: gold_rates::ActiveModel = existing.into();
        active.release_datetime = Set(release_datetime);
        set_sheet(&mut active, sheet);

        match active.update(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(GoldRateError::DuplicateReleaseTimestamp)
                }
                _ => Err(err.into()),
            },
        }
    }

    /// Deletes a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no snapshot has the id.
    pub async fn delete(&self, id: Uuid) -> Result<(), GoldRateError> {
        let result = gold_rates::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(GoldRateError::NotFound);
        }
        Ok(())
    }

    /// Finds a snapshot by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no snapshot has the id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<gold_rates::Model, GoldRateError> {
        gold_rates::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(GoldRateError::NotFound)
    }

    /// Returns the most recent snapshot whose release timestamp is at or
    /// before `now`.
    ///
    /// Snapshots dated in the future stay invisible until their release
    /// time arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn latest_visible(
        &self,
        now: NaiveDateTime,
    ) -> Result<Option<gold_rates::Model>, GoldRateError> {
        let snapshot = gold_rates::Entity::find()
            .filter(gold_rates::Column::ReleaseDatetime.lte(now))
            .order_by_desc(gold_rates::Column::ReleaseDatetime)
            .one(&self.db)
            .await?;

        Ok(snapshot)
    }

    /// Lists snapshots released inside a window, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn history(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<gold_rates::Model>, GoldRateError> {
        let snapshots = gold_rates::Entity::find()
            .filter(gold_rates::Column::ReleaseDatetime.gte(start))
            .filter(gold_rates::Column::ReleaseDatetime.lte(end))
            .order_by_desc(gold_rates::Column::ReleaseDatetime)
            .all(&self.db)
            .await?;

        Ok(snapshots)
    }

    /// Fetches one page of snapshots, newest release first, with the
    /// total row count.
    ///
    /// `page` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn page(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<gold_rates::Model>, u64), GoldRateError> {
        let paginator = gold_rates::Entity::find()
            .order_by_desc(gold_rates::Column::ReleaseDatetime)
            .paginate(&self.db, u64::from(limit.max(1)));

        let total = paginator.num_items().await?;
        let snapshots = paginator.fetch_page(u64::from(page.max(1)) - 1).await?;

        Ok((snapshots, total))
    }

    /// Lists every snapshot, newest release first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<gold_rates::Model>, GoldRateError> {
        let snapshots = gold_rates::Entity::find()
            .order_by_desc(gold_rates::Column::ReleaseDatetime)
            .all(&self.db)
            .await?;

        Ok(snapshots)
    }

    /// Lists the `n` most recently released snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent(&self, n: u64) -> Result<Vec<gold_rates::Model>, GoldRateError> {
        let snapshots = gold_rates::Entity::find()
            .order_by_desc(gold_rates::Column::ReleaseDatetime)
            .limit(n)
            .all(&self.db)
            .await?;

        Ok(snapshots)
    }

    /// Counts all snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, GoldRateError> {
        Ok(gold_rates::Entity::find().count(&self.db).await?)
    }
}

/// Builds the full active model for a new snapshot.
fn active_model_for(
    id: Uuid,
    release_datetime: NaiveDateTime,
    sheet: RateSheet,
) -> gold_rates::ActiveModel {
    let mut active = gold_rates::ActiveModel {
        id: Set(id),
        release_datetime: Set(release_datetime),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };
    set_sheet(&mut active, sheet);
    active
}

/// Writes all nine figures into an active model.
fn set_sheet(active: &mut gold_rates::ActiveModel, sheet: RateSheet) {
    active.gold_24k_new_rate = Set(sheet.k24.selling);
    active.gold_24k_exchange_rate = Set(sheet.k24.exchange);
    active.gold_24k_making_charges = Set(sheet.k24.making);
    active.gold_22k_new_rate = Set(sheet.k22.selling);
    active.gold_22k_exchange_rate = Set(sheet.k22.exchange);
    active.gold_22k_making_charges = Set(sheet.k22.making);
    active.gold_18k_new_rate = Set(sheet.k18.selling);
    active.gold_18k_exchange_rate = Set(sheet.k18.exchange);
    active.gold_18k_making_charges = Set(sheet.k18.making);
}

/// Reads the nine figures back out of a stored snapshot.
#[must_use]
pub fn sheet_of(model: &gold_rates::Model) -> RateSheet {
    RateSheet {
        k24: RateTriple {
            selling: model.gold_24k_new_rate,
            exchange: model.gold_24k_exchange_rate,
            making: model.gold_24k_making_charges,
        },
        k22: RateTriple {
            selling: model.gold_22k_new_rate,
            exchange: model.gold_22k_exchange_rate,
            making: model.gold_22k_making_charges,
        },
        k18: RateTriple {
            selling: model.gold_18k_new_rate,
            exchange: model.gold_18k_exchange_rate,
            making: model.gold_18k_making_charges,
        },
    }
}

/// Checks a candidate release timestamp against the ones already stored.
///
/// Mirrors the unique constraint so the rule can be tested without a
/// database.
#[must_use]
pub fn release_timestamp_taken(existing: &[NaiveDateTime], candidate: NaiveDateTime) -> bool {
    existing.contains(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_core::rates::Purity;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sample_model() -> gold_rates::Model {
        gold_rates::Model {
            id: Uuid::new_v4(),
            gold_24k_new_rate: dec!(7200.00),
            gold_24k_exchange_rate: dec!(6800.00),
            gold_24k_making_charges: dec!(800.00),
            gold_22k_new_rate: dec!(6600.00),
            gold_22k_exchange_rate: dec!(6200.00),
            gold_22k_making_charges: dec!(600.00),
            gold_18k_new_rate: dec!(5400.00),
            gold_18k_exchange_rate: dec!(5000.00),
            gold_18k_making_charges: dec!(400.00),
            release_datetime: at(2025, 8, 1, 10, 30),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn test_sheet_of_maps_all_nine_figures() {
        let sheet = sheet_of(&sample_model());

        assert_eq!(sheet.triple(Purity::K24).selling, dec!(7200.00));
        assert_eq!(sheet.triple(Purity::K24).exchange, dec!(6800.00));
        assert_eq!(sheet.triple(Purity::K24).making, dec!(800.00));
        assert_eq!(sheet.triple(Purity::K22).selling, dec!(6600.00));
        assert_eq!(sheet.triple(Purity::K22).exchange, dec!(6200.00));
        assert_eq!(sheet.triple(Purity::K22).making, dec!(600.00));
        assert_eq!(sheet.triple(Purity::K18).selling, dec!(5400.00));
        assert_eq!(sheet.triple(Purity::K18).exchange, dec!(5000.00));
        assert_eq!(sheet.triple(Purity::K18).making, dec!(400.00));
    }

    #[test]
    fn test_set_sheet_round_trips_through_active_model() {
        let model = sample_model();
        let sheet = sheet_of(&model);

        let active = active_model_for(model.id, model.release_datetime, sheet);

        assert_eq!(active.gold_24k_new_rate, Set(dec!(7200.00)));
        assert_eq!(active.gold_22k_exchange_rate, Set(dec!(6200.00)));
        assert_eq!(active.gold_18k_making_charges, Set(dec!(400.00)));
        assert_eq!(active.release_datetime, Set(at(2025, 8, 1, 10, 30)));
    }

    #[test]
    fn test_release_timestamp_taken_detects_exact_match() {
        let existing = vec![at(2025, 8, 1, 10, 30), at(2025, 8, 2, 11, 0)];

        assert!(release_timestamp_taken(&existing, at(2025, 8, 1, 10, 30)));
        assert!(!release_timestamp_taken(&existing, at(2025, 8, 1, 10, 31)));
        assert!(!release_timestamp_taken(&[], at(2025, 8, 1, 10, 30)));
    }

    fn datetime_strategy() -> impl Strategy<Value = NaiveDateTime> {
        (0i64..10_000_000).prop_map(|secs| at(2025, 1, 1, 0, 0) + chrono::Duration::seconds(secs))
    }

    proptest! {
        #[test]
        fn prop_candidate_collides_iff_already_stored(
            existing in prop::collection::vec(datetime_strategy(), 0..16),
            candidate in datetime_strategy(),
        ) {
            let taken = release_timestamp_taken(&existing, candidate);
            prop_assert_eq!(taken, existing.iter().any(|ts| *ts == candidate));
        }
    }
}
