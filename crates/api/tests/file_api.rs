//! HTTP-level integration tests for poster upload and download at `/file`.

mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, body_json, body_text, build_test_app, get, send_multipart, Part};
use sqlx::PgPool;
use tempfile::TempDir;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_then_serve(pool: PgPool) {
    let dir = TempDir::new().unwrap();

    let app = build_test_app(pool.clone(), dir.path());
    let response = send_multipart(
        app,
        "POST",
        "/file/upload",
        &[Part::File {
            name: "file",
            file_name: "poster.png",
            bytes: b"\x89PNG-bytes",
        }],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "File uploaded : poster.png");

    let app = build_test_app(pool, dir.path());
    let response = get(app, "/file/poster.png").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(body_bytes(response).await, b"\x89PNG-bytes");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_duplicate_name_returns_409(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("taken.jpg"), b"original").unwrap();

    let app = build_test_app(pool, dir.path());
    let response = send_multipart(
        app,
        "POST",
        "/file/upload",
        &[Part::File {
            name: "file",
            file_name: "taken.jpg",
            bytes: b"replacement",
        }],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "ALREADY_EXISTS");
    assert_eq!(std::fs::read(dir.path().join("taken.jpg")).unwrap(), b"original");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_empty_file_returns_400(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let app = build_test_app(pool, dir.path());

    let response = send_multipart(
        app,
        "POST",
        "/file/upload",
        &[Part::File {
            name: "file",
            file_name: "empty.png",
            bytes: b"",
        }],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "EMPTY_FILE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_serve_missing_file_returns_404(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let app = build_test_app(pool, dir.path());

    let response = get(app, "/file/nothing-here.png").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "FILE_NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_serve_unknown_extension_as_octet_stream(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.dat"), b"raw").unwrap();
    let app = build_test_app(pool, dir.path());

    let response = get(app, "/file/notes.dat").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_serve_rejects_encoded_traversal(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let app = build_test_app(pool, dir.path());

    // `%2F` decodes to a separator inside the single path segment.
    let response = get(app, "/file/..%2Fsecret.txt").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
