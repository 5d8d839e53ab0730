//! Content blocks: upsert keyed by system name.

use sqlx::PgPool;

use clubhouse_db::models::content::SaveContent;
use clubhouse_db::repositories::ContentRepo;

fn save(title: &str, text: &str) -> SaveContent {
    SaveContent {
        title: title.to_string(),
        text: text.to_string(),
    }
}

async fn admin_id(pool: &PgPool) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (name, email, role_id)
         VALUES ('Admin', 'admin@example.com', (SELECT id FROM roles WHERE name = 'admin'))
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_creates_then_overwrites(pool: PgPool) {
    let user_id = admin_id(&pool).await;

    let first = ContentRepo::upsert(&pool, "home_intro", &save("Welcome", "Hello"), user_id)
        .await
        .unwrap();
    let second = ContentRepo::upsert(&pool, "home_intro", &save("  Welcome back ", "Hi"), user_id)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Welcome back");
    assert_eq!(second.text, "Hi");
    assert_eq!(second.updated_by, Some(user_id));

    let all = ContentRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_block_and_delete(pool: PgPool) {
    let user_id = admin_id(&pool).await;

    assert!(ContentRepo::find_by_system_name(&pool, "footer")
        .await
        .unwrap()
        .is_none());

    ContentRepo::upsert(&pool, "footer", &save("Footer", ""), user_id)
        .await
        .unwrap();
    assert!(ContentRepo::delete(&pool, "footer").await.unwrap());
    assert!(!ContentRepo::delete(&pool, "footer").await.unwrap());
}
