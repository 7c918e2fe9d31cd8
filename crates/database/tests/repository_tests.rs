use chrono::{Duration, Utc};
use estate_auth::Role;
use estate_config::DatabaseConfig;
use estate_database::{
    initialize_database, FlatRepository, FlatStatus, FlatUpdate, HouseRepository, NewFlat,
    NewHouse, RepositoryError, User, UserRepository,
};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

struct TestContext {
    pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestContext {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("estate.db").display()),
            max_connections: 4,
        };
        let pool = initialize_database(&config).await.expect("database");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    async fn house(&self) -> i64 {
        let now = Utc::now();
        HouseRepository::new(self.pool.clone())
            .create(&NewHouse {
                address: "Main St".to_string(),
                year: 2020,
                developer: String::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .expect("house")
            .id
    }
}

fn user(email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        role: Role::Client,
    }
}

#[tokio::test]
async fn user_round_trip_and_lookup_by_email() {
    let ctx = TestContext::new().await;
    let repo = UserRepository::new(ctx.pool.clone());
    let created = user("a@x.com");

    repo.create(&created).await.unwrap();

    assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);
    assert_eq!(repo.get_by_email("a@x.com").await.unwrap(), created);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_and_keeps_first_user() {
    let ctx = TestContext::new().await;
    let repo = UserRepository::new(ctx.pool.clone());
    let first = user("dup@x.com");
    repo.create(&first).await.unwrap();

    let err = repo.create(&user("dup@x.com")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)), "got {err:?}");

    assert_eq!(repo.get_by_email("dup@x.com").await.unwrap().id, first.id);
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let ctx = TestContext::new().await;
    let repo = UserRepository::new(ctx.pool.clone());

    assert!(matches!(
        repo.get_by_id(Uuid::now_v7()).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repo.get_by_email("nobody@x.com").await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn house_create_returns_generated_id() {
    let ctx = TestContext::new().await;
    let repo = HouseRepository::new(ctx.pool.clone());
    let now = Utc::now();

    let first = repo
        .create(&NewHouse {
            address: "Main St".to_string(),
            year: 2020,
            developer: "Acme".to_string(),
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
    let second_id = ctx.house().await;

    assert!(second_id > first.id);
    assert_eq!(first.developer, "Acme");
    assert_eq!(repo.get_by_id(first.id).await.unwrap(), first);
    assert!(matches!(
        repo.get_by_id(9_999).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn flat_create_is_visible_and_listed() {
    let ctx = TestContext::new().await;
    let house_id = ctx.house().await;
    let flats = FlatRepository::new(ctx.pool.clone());
    let houses = HouseRepository::new(ctx.pool.clone());
    let before = houses.get_by_id(house_id).await.unwrap().updated_at;

    let flat = flats
        .create(&NewFlat {
            house_id,
            price: 100_000,
            rooms: 2,
        })
        .await
        .unwrap();

    assert_eq!(flat.status, FlatStatus::Created);
    assert_eq!(flat.moderator_id, None);
    assert_eq!(flats.get_by_id(flat.id, house_id).await.unwrap(), flat);
    assert_eq!(houses.get_flats_by_house_id(house_id).await.unwrap(), vec![flat]);
    assert!(houses.get_by_id(house_id).await.unwrap().updated_at >= before);
}

#[tokio::test(flavor = "multi_thread")]
async fn writes_with_returning_are_visible_across_pooled_connections() {
    let ctx = TestContext::new().await;
    let houses = HouseRepository::new(ctx.pool.clone());
    let flats = FlatRepository::new(ctx.pool.clone());

    for _ in 0..3 {
        let house_id = ctx.house().await;
        assert_eq!(houses.get_by_id(house_id).await.unwrap().id, house_id);

        let flat = flats
            .create(&NewFlat {
                house_id,
                price: 10,
                rooms: 1,
            })
            .await
            .unwrap();
        let moved = flats
            .update(&FlatUpdate {
                flat_id: flat.id,
                house_id,
                status: FlatStatus::OnModeration,
                expected: FlatStatus::Created,
                moderator_id: Uuid::now_v7(),
            })
            .await
            .unwrap();

        assert_eq!(
            flats.get_by_id(flat.id, house_id).await.unwrap().status,
            FlatStatus::OnModeration
        );
        assert_eq!(houses.get_flats_by_house_id(house_id).await.unwrap(), vec![moved]);
    }
}

#[tokio::test]
async fn flat_insert_without_commit_leaves_nothing_behind() {
    let ctx = TestContext::new().await;
    let house_id = ctx.house().await;
    let flats = FlatRepository::new(ctx.pool.clone());

    let mut tx = ctx.pool.begin().await.unwrap();
    let pending = FlatRepository::insert(
        &mut *tx,
        &NewFlat {
            house_id,
            price: 1,
            rooms: 1,
        },
    )
    .await
    .unwrap();
    assert!(pending.id > 0);
    drop(tx);

    assert!(matches!(
        flats.get_by_id(pending.id, house_id).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(HouseRepository::new(ctx.pool.clone())
        .get_flats_by_house_id(house_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn flat_for_unknown_house_is_a_missing_reference() {
    let ctx = TestContext::new().await;
    let flats = FlatRepository::new(ctx.pool.clone());

    let err = flats
        .create(&NewFlat {
            house_id: 404,
            price: 1,
            rooms: 1,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::MissingReference(_)), "got {err:?}");
}

#[tokio::test]
async fn flat_update_is_compare_and_set() {
    let ctx = TestContext::new().await;
    let house_id = ctx.house().await;
    let flats = FlatRepository::new(ctx.pool.clone());
    let moderator = Uuid::now_v7();
    let flat = flats
        .create(&NewFlat {
            house_id,
            price: 5,
            rooms: 3,
        })
        .await
        .unwrap();

    let moved = flats
        .update(&FlatUpdate {
            flat_id: flat.id,
            house_id,
            expected: FlatStatus::Created,
            status: FlatStatus::OnModeration,
            moderator_id: moderator,
        })
        .await
        .unwrap();
    assert_eq!(moved.status, FlatStatus::OnModeration);
    assert_eq!(moved.moderator_id, Some(moderator));

    let stale = flats
        .update(&FlatUpdate {
            flat_id: flat.id,
            house_id,
            expected: FlatStatus::Created,
            status: FlatStatus::OnModeration,
            moderator_id: moderator,
        })
        .await
        .unwrap_err();
    assert!(matches!(stale, RepositoryError::Conflict(_)), "got {stale:?}");

    let wrong_house = flats
        .update(&FlatUpdate {
            flat_id: flat.id,
            house_id: house_id + 1,
            expected: FlatStatus::OnModeration,
            status: FlatStatus::Approved,
            moderator_id: moderator,
        })
        .await
        .unwrap_err();
    assert!(matches!(wrong_house, RepositoryError::NotFound(_)));

    let stored = flats.get_by_id(flat.id, house_id).await.unwrap();
    assert_eq!(stored.status, FlatStatus::OnModeration);
}

#[tokio::test]
async fn subscriptions_are_recorded_without_dedup() {
    let ctx = TestContext::new().await;
    let house_id = ctx.house().await;
    let houses = HouseRepository::new(ctx.pool.clone());
    let client = Uuid::now_v7();

    houses.subscribe_by_id(house_id, client).await.unwrap();
    houses.subscribe_by_id(house_id, client).await.unwrap();

    assert_eq!(houses.subscribers(house_id).await.unwrap(), vec![client, client]);

    let err = houses
        .subscribe_by_id(house_id + 100, client)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::MissingReference(_)));
}

#[tokio::test]
async fn houses_keep_their_timestamps() {
    let ctx = TestContext::new().await;
    let repo = HouseRepository::new(ctx.pool.clone());
    let created_at = Utc::now() - Duration::days(1);

    let house = repo
        .create(&NewHouse {
            address: "Old Rd".to_string(),
            year: 0,
            developer: String::new(),
            created_at,
            updated_at: created_at,
        })
        .await
        .unwrap();

    assert_eq!(house.created_at, created_at);
    assert_eq!(house.year, 0);
}
