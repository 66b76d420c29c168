use std::future::Future;

use anyhow::{Context, Result};
use argip_api_models::{NutCreate, RangeCreate, ScrewLengthCreate};
use argip_data::{NewUser, PgStore, SessionRecord};
use argip_test_support::start_postgres;
use chrono::{Duration, Utc};
use uuid::Uuid;

async fn with_store<F, Fut>(test: F) -> Result<()>
where
    F: FnOnce(PgStore) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let Some(database) = start_postgres().await? else {
        eprintln!("skipping data store tests: no postgres backend available");
        return Ok(());
    };

    let store = PgStore::new(database.pool())
        .await
        .context("failed to initialise store")?;
    let result = test(store).await;
    database.close().await?;
    result
}

fn range(nazwa: &str, od: f64, do_: f64) -> RangeCreate {
    RangeCreate {
        nazwa: nazwa.to_string(),
        od,
        do_,
    }
}

#[tokio::test]
async fn users_are_unique_by_username_and_email() -> Result<()> {
    with_store(|store| async move {
        let created = store
            .insert_user(NewUser {
                username: "jan",
                email: "jan@example.pl",
                hashed_password: "$argon2id$stub",
            })
            .await?;
        assert_eq!(
            store.find_user_by_username("jan").await?.map(|u| u.id),
            Some(created.id)
        );
        assert!(store.find_user_by_email("jan@example.pl").await?.is_some());

        let duplicate = store
            .insert_user(NewUser {
                username: "jan",
                email: "other@example.pl",
                hashed_password: "$argon2id$stub",
            })
            .await
            .expect_err("duplicate username must fail");
        assert!(duplicate.unique_violation().is_some());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn sessions_round_trip_and_purge() -> Result<()> {
    with_store(|store| async move {
        let user = store
            .insert_user(NewUser {
                username: "ola",
                email: "ola@example.pl",
                hashed_password: "$argon2id$stub",
            })
            .await?;
        let now = Utc::now();
        let live = SessionRecord {
            id: Uuid::new_v4(),
            user_id: user.id,
            secret_hash: "live".to_string(),
            expires_at: now + Duration::minutes(30),
        };
        let stale = SessionRecord {
            id: Uuid::new_v4(),
            user_id: user.id,
            secret_hash: "stale".to_string(),
            expires_at: now - Duration::minutes(1),
        };
        store.insert_session(&live).await?;
        store.insert_session(&stale).await?;

        assert_eq!(store.purge_expired_sessions(now).await?, 1);
        let fetched = store.find_session(live.id).await?.context("live session")?;
        assert_eq!(fetched.user_id, user.id);
        assert!(store.find_session(stale.id).await?.is_none());

        assert!(store.delete_session(live.id).await?);
        assert!(!store.delete_session(live.id).await?);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn range_crud_and_bound_check() -> Result<()> {
    with_store(|store| async move {
        let created = store.insert_range(&range("M6", 5.0, 7.0)).await?;
        assert_eq!(created.nazwa, "M6");

        let updated = store
            .update_range(created.id, &range("M6 wide", 5.0, 8.0))
            .await?
            .context("range should exist")?;
        assert!((updated.do_ - 8.0).abs() < f64::EPSILON);
        assert!(store.update_range(9_999, &range("x", 1.0, 2.0)).await?.is_none());

        assert!(store.insert_range(&range("bad", 9.0, 3.0)).await.is_err());

        assert_eq!(store.list_ranges().await?.len(), 1);
        assert!(store.delete_range(created.id).await?);
        assert!(store.get_range(created.id).await?.is_none());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn nuts_filter_by_range_and_cascade() -> Result<()> {
    with_store(|store| async move {
        let small = store.insert_range(&range("small", 1.0, 5.0)).await?;
        let large = store.insert_range(&range("large", 5.0, 20.0)).await?;
        let nut = |id_zakresu, nazwa: &str| NutCreate {
            id_zakresu,
            nazwa: nazwa.to_string(),
            srednica: 4.0,
            cena: 1.234,
        };
        let first = store.insert_nut(&nut(small.id, "A")).await?;
        store.insert_nut(&nut(large.id, "B")).await?;
        assert!((first.cena - 1.23).abs() < 1e-9);

        assert_eq!(store.list_nuts(None).await?.len(), 2);
        let filtered = store.list_nuts(Some(small.id)).await?;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].nazwa, "A");

        let orphan = store
            .insert_nut(&nut(9_999, "C"))
            .await
            .expect_err("unknown range must fail");
        assert!(orphan.foreign_key_violation().is_some());

        assert!(store.delete_range(small.id).await?);
        assert!(store.get_nut(first.id).await?.is_none());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn screw_lengths_are_ordered_and_unique() -> Result<()> {
    with_store(|store| async move {
        for (srednica, dlugosc) in [(8.0, 40.0), (6.0, 30.0), (6.0, 20.0)] {
            store
                .insert_screw_length(&ScrewLengthCreate { srednica, dlugosc })
                .await?;
        }
        let listed = store.list_screw_lengths().await?;
        let pairs: Vec<(f64, f64)> = listed.iter().map(|s| (s.srednica, s.dlugosc)).collect();
        assert_eq!(pairs, vec![(6.0, 20.0), (6.0, 30.0), (8.0, 40.0)]);

        assert!(store.screw_length_exists(6.0, 30.0).await?);
        assert!(!store.screw_length_exists(6.0, 31.0).await?);
        let duplicate = store
            .insert_screw_length(&ScrewLengthCreate {
                srednica: 6.0,
                dlugosc: 30.0,
            })
            .await
            .expect_err("duplicate pair must fail");
        assert!(duplicate.unique_violation().is_some());

        assert!(store.delete_screw_length(listed[0].id).await?);
        assert!(!store.delete_screw_length(listed[0].id).await?);
        Ok(())
    })
    .await
}
