//! Ranges, nuts, and screw lengths.
//!
//! # Design
//! - Prices live in `NUMERIC(10,2)` and are read back as `float8` for the wire.
//! - Updates write the full merged record; callers merge partial payloads first.
//! - Deleting a range cascades to its nuts through the foreign key.

use argip_api_models::{Nut, NutCreate, Range, RangeCreate, ScrewLength, ScrewLengthCreate};
use sqlx::{Row, postgres::PgRow};

use crate::error::{DataError, Result};
use crate::store::PgStore;

const SELECT_RANGES: &str = r#"
    SELECT id, nazwa, od, "do" FROM ranges ORDER BY id
"#;

const SELECT_RANGE: &str = r#"
    SELECT id, nazwa, od, "do" FROM ranges WHERE id = $1
"#;

const INSERT_RANGE: &str = r#"
    INSERT INTO ranges (nazwa, od, "do")
    VALUES ($1, $2, $3)
    RETURNING id, nazwa, od, "do"
"#;

const UPDATE_RANGE: &str = r#"
    UPDATE ranges SET nazwa = $2, od = $3, "do" = $4
    WHERE id = $1
    RETURNING id, nazwa, od, "do"
"#;

const DELETE_RANGE: &str = r"DELETE FROM ranges WHERE id = $1";

const SELECT_NUTS: &str = r"
    SELECT id, id_zakresu, nazwa, srednica, cena::float8 AS cena
    FROM nuts
    WHERE ($1::bigint IS NULL OR id_zakresu = $1)
    ORDER BY id
";

const SELECT_NUT: &str = r"
    SELECT id, id_zakresu, nazwa, srednica, cena::float8 AS cena
    FROM nuts WHERE id = $1
";

const INSERT_NUT: &str = r"
    INSERT INTO nuts (id_zakresu, nazwa, srednica, cena)
    VALUES ($1, $2, $3, ROUND($4::float8::numeric, 2))
    RETURNING id, id_zakresu, nazwa, srednica, cena::float8 AS cena
";

const UPDATE_NUT: &str = r"
    UPDATE nuts
    SET id_zakresu = $2, nazwa = $3, srednica = $4, cena = ROUND($5::float8::numeric, 2)
    WHERE id = $1
    RETURNING id, id_zakresu, nazwa, srednica, cena::float8 AS cena
";

const DELETE_NUT: &str = r"DELETE FROM nuts WHERE id = $1";

const SELECT_SCREW_LENGTHS: &str = r"
    SELECT id, srednica, dlugosc FROM screw_lengths ORDER BY srednica, dlugosc
";

const SELECT_SCREW_LENGTH_PAIR: &str = r"
    SELECT EXISTS (
        SELECT 1 FROM screw_lengths WHERE srednica = $1 AND dlugosc = $2
    ) AS present
";

const INSERT_SCREW_LENGTH: &str = r"
    INSERT INTO screw_lengths (srednica, dlugosc)
    VALUES ($1, $2)
    RETURNING id, srednica, dlugosc
";

const DELETE_SCREW_LENGTH: &str = r"DELETE FROM screw_lengths WHERE id = $1";

fn range_from_row(row: &PgRow) -> sqlx::Result<Range> {
    Ok(Range {
        id: row.try_get("id")?,
        nazwa: row.try_get("nazwa")?,
        od: row.try_get("od")?,
        do_: row.try_get("do")?,
    })
}

fn nut_from_row(row: &PgRow) -> sqlx::Result<Nut> {
    Ok(Nut {
        id: row.try_get("id")?,
        id_zakresu: row.try_get("id_zakresu")?,
        nazwa: row.try_get("nazwa")?,
        srednica: row.try_get("srednica")?,
        cena: row.try_get("cena")?,
    })
}

fn screw_length_from_row(row: &PgRow) -> sqlx::Result<ScrewLength> {
    Ok(ScrewLength {
        id: row.try_get("id")?,
        srednica: row.try_get("srednica")?,
        dlugosc: row.try_get("dlugosc")?,
    })
}

impl PgStore {
    /// List every range ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_ranges(&self) -> Result<Vec<Range>> {
        sqlx::query(SELECT_RANGES)
            .try_map(|row: PgRow| range_from_row(&row))
            .fetch_all(&self.pool)
            .await
            .map_err(DataError::query("ranges.list"))
    }

    /// Fetch a single range.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_range(&self, id: i64) -> Result<Option<Range>> {
        sqlx::query(SELECT_RANGE)
            .bind(id)
            .try_map(|row: PgRow| range_from_row(&row))
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::query("ranges.get"))
    }

    /// Insert a range.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including the bound-ordering check).
    pub async fn insert_range(&self, range: &RangeCreate) -> Result<Range> {
        sqlx::query(INSERT_RANGE)
            .bind(range.nazwa.trim())
            .bind(range.od)
            .bind(range.do_)
            .try_map(|row: PgRow| range_from_row(&row))
            .fetch_one(&self.pool)
            .await
            .map_err(DataError::query("ranges.insert"))
    }

    /// Overwrite a range with the merged record; `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_range(&self, id: i64, range: &RangeCreate) -> Result<Option<Range>> {
        sqlx::query(UPDATE_RANGE)
            .bind(id)
            .bind(range.nazwa.trim())
            .bind(range.od)
            .bind(range.do_)
            .try_map(|row: PgRow| range_from_row(&row))
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::query("ranges.update"))
    }

    /// Delete a range and, through the cascade, its nuts.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_range(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(DELETE_RANGE)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DataError::query("ranges.delete"))?;
        Ok(result.rows_affected() > 0)
    }

    /// List nuts, optionally restricted to one range.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_nuts(&self, range_id: Option<i64>) -> Result<Vec<Nut>> {
        sqlx::query(SELECT_NUTS)
            .bind(range_id)
            .try_map(|row: PgRow| nut_from_row(&row))
            .fetch_all(&self.pool)
            .await
            .map_err(DataError::query("nuts.list"))
    }

    /// Fetch a single nut.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_nut(&self, id: i64) -> Result<Option<Nut>> {
        sqlx::query(SELECT_NUT)
            .bind(id)
            .try_map(|row: PgRow| nut_from_row(&row))
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::query("nuts.get"))
    }

    /// Insert a nut; an unknown range surfaces through [`DataError::foreign_key_violation`].
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_nut(&self, nut: &NutCreate) -> Result<Nut> {
        sqlx::query(INSERT_NUT)
            .bind(nut.id_zakresu)
            .bind(nut.nazwa.trim())
            .bind(nut.srednica)
            .bind(nut.cena)
            .try_map(|row: PgRow| nut_from_row(&row))
            .fetch_one(&self.pool)
            .await
            .map_err(DataError::query("nuts.insert"))
    }

    /// Overwrite a nut with the merged record; `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_nut(&self, id: i64, nut: &NutCreate) -> Result<Option<Nut>> {
        sqlx::query(UPDATE_NUT)
            .bind(id)
            .bind(nut.id_zakresu)
            .bind(nut.nazwa.trim())
            .bind(nut.srednica)
            .bind(nut.cena)
            .try_map(|row: PgRow| nut_from_row(&row))
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::query("nuts.update"))
    }

    /// Delete a nut.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_nut(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(DELETE_NUT)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DataError::query("nuts.delete"))?;
        Ok(result.rows_affected() > 0)
    }

    /// List screw lengths ordered by diameter, then length.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_screw_lengths(&self) -> Result<Vec<ScrewLength>> {
        sqlx::query(SELECT_SCREW_LENGTHS)
            .try_map(|row: PgRow| screw_length_from_row(&row))
            .fetch_all(&self.pool)
            .await
            .map_err(DataError::query("screw_lengths.list"))
    }

    /// Whether the diameter/length pair is already recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn screw_length_exists(&self, srednica: f64, dlugosc: f64) -> Result<bool> {
        let row = sqlx::query(SELECT_SCREW_LENGTH_PAIR)
            .bind(srednica)
            .bind(dlugosc)
            .fetch_one(&self.pool)
            .await
            .map_err(DataError::query("screw_lengths.exists"))?;
        row.try_get("present")
            .map_err(DataError::query("screw_lengths.exists"))
    }

    /// Insert a screw length; duplicates surface through [`DataError::unique_violation`].
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_screw_length(&self, screw: &ScrewLengthCreate) -> Result<ScrewLength> {
        sqlx::query(INSERT_SCREW_LENGTH)
            .bind(screw.srednica)
            .bind(screw.dlugosc)
            .try_map(|row: PgRow| screw_length_from_row(&row))
            .fetch_one(&self.pool)
            .await
            .map_err(DataError::query("screw_lengths.insert"))
    }

    /// Delete a screw length.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_screw_length(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(DELETE_SCREW_LENGTH)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DataError::query("screw_lengths.delete"))?;
        Ok(result.rows_affected() > 0)
    }
}
