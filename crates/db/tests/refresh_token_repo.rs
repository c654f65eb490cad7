//! Integration tests for users and refresh tokens.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use movieflix_db::models::refresh_token::CreateRefreshToken;
use movieflix_db::models::user::CreateUser;
use movieflix_db::repositories::{RefreshTokenRepo, UserRepo};
use sqlx::PgPool;

fn new_user(name: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        username: name.to_lowercase(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_lookup_by_email(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Alice")).await.unwrap();
    assert_eq!(user.role, "USER");

    let found = UserRepo::find_by_email(&pool, "alice@example.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(found.id, user.id);

    assert!(UserRepo::exists_by_email_or_username(&pool, "other@example.com", "alice")
        .await
        .unwrap());
    assert!(!UserRepo::exists_by_email_or_username(&pool, "bob@example.com", "bob")
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("Alice")).await.unwrap();

    let mut dup = new_user("Alice2");
    dup.email = "alice@example.com".to_string();
    let err = UserRepo::create(&pool, &dup).await.unwrap_err();

    assert_matches!(err, sqlx::Error::Database(db) if db.constraint() == Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_lookup_and_delete(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Alice")).await.unwrap();
    let expires = Utc::now() + Duration::seconds(120);

    let token = RefreshTokenRepo::create_or_get(
        &pool,
        &CreateRefreshToken {
            user_id: user.id,
            refresh_token: "token-value".to_string(),
            expiration_time: expires,
        },
    )
    .await
    .unwrap();

    let by_user = RefreshTokenRepo::find_by_user_id(&pool, user.id)
        .await
        .unwrap()
        .expect("token by user");
    let by_value = RefreshTokenRepo::find_by_token(&pool, "token-value")
        .await
        .unwrap()
        .expect("token by value");
    assert_eq!(by_user.id, token.id);
    assert_eq!(by_value.id, token.id);
    assert!(!by_value.is_expired_at(Utc::now()));
    assert!(by_value.is_expired_at(expires + Duration::seconds(1)));

    assert!(RefreshTokenRepo::delete(&pool, token.id).await.unwrap());
    assert!(RefreshTokenRepo::find_by_token(&pool, "token-value")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_token_per_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Alice")).await.unwrap();
    let input = |value: &str| CreateRefreshToken {
        user_id: user.id,
        refresh_token: value.to_string(),
        expiration_time: Utc::now() + Duration::seconds(120),
    };

    let first = RefreshTokenRepo::create_or_get(&pool, &input("first")).await.unwrap();
    let second = RefreshTokenRepo::create_or_get(&pool, &input("second")).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.refresh_token, "first");
    assert!(RefreshTokenRepo::find_by_token(&pool, "second")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_token_value_violates_unique_constraint(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("Alice")).await.unwrap();
    let bob = UserRepo::create(&pool, &new_user("Bob")).await.unwrap();
    let input = |user_id| CreateRefreshToken {
        user_id,
        refresh_token: "shared".to_string(),
        expiration_time: Utc::now() + Duration::seconds(120),
    };

    RefreshTokenRepo::create_or_get(&pool, &input(alice.id)).await.unwrap();
    let err = RefreshTokenRepo::create_or_get(&pool, &input(bob.id))
        .await
        .unwrap_err();

    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.constraint() == Some("uq_refresh_tokens_refresh_token")
    );
}
