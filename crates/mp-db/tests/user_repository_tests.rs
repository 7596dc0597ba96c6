mod common;

use common::{create_profile, create_test_pool, create_test_user};

use mp_core::UserPatch;
use mp_db::{DbError, UserRepository};

use googletest::prelude::*;

#[tokio::test]
async fn given_valid_user_when_inserted_then_can_be_found_by_id() {
    // Given: An empty database
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);

    // When: Inserting a user
    let stored = repo
        .insert(&create_test_user("ada@example.com"))
        .await
        .unwrap();

    // Then: Finding by the assigned id returns the stored record
    let result = repo.find_by_id(stored.id).await.unwrap();

    assert_that!(result, some(anything()));
    let found = result.unwrap();
    assert_that!(found.id, eq(stored.id));
    assert_that!(found.name, eq("Test User"));
    assert_that!(found.email, eq("ada@example.com"));
    assert_that!(found.city, eq("Paris"));
    assert_that!(
        found.interests,
        eq(&vec!["music".to_string(), "chess".to_string()])
    );
}

#[tokio::test]
async fn given_two_users_when_inserted_then_ids_are_distinct_and_increasing() {
    // Given: An empty database
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);

    // When: Inserting two users
    let first = repo
        .insert(&create_test_user("first@example.com"))
        .await
        .unwrap();
    let second = repo
        .insert(&create_test_user("second@example.com"))
        .await
        .unwrap();

    // Then: The second id is strictly greater
    assert_that!(second.id, gt(first.id));
}

#[tokio::test]
async fn given_existing_email_when_inserted_again_then_fails_with_duplicate() {
    // Given: A user already stored under an email
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    repo.insert(&create_test_user("taken@example.com"))
        .await
        .unwrap();

    // When: Inserting a different profile with the same email
    let mut other = create_test_user("taken@example.com");
    other.name = "Someone Else".to_string();
    let result = repo.insert(&other).await;

    // Then: The unique index rejects the write
    assert_that!(result, err(anything()));
    assert!(matches!(
        result.unwrap_err(),
        DbError::DuplicateEmail { .. }
    ));
}

#[tokio::test]
async fn given_empty_database_when_finding_nonexistent_id_then_returns_none() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);

    let result = repo.find_by_id(42).await.unwrap();

    assert_that!(result, none());
}

#[tokio::test]
async fn given_stored_user_when_finding_by_email_then_returns_it() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let stored = repo
        .insert(&create_test_user("ada@example.com"))
        .await
        .unwrap();

    let result = repo.find_by_email("ada@example.com").await.unwrap();

    assert_that!(result, some(anything()));
    assert_that!(result.unwrap().id, eq(stored.id));

    let missing = repo.find_by_email("nobody@example.com").await.unwrap();
    assert_that!(missing, none());
}

#[tokio::test]
async fn given_several_users_when_paging_then_respects_skip_and_limit() {
    // Given: Five stored users
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    for n in 0..5 {
        repo.insert(&create_test_user(&format!("user{}@example.com", n)))
            .await
            .unwrap();
    }

    // When: Requesting the second page of two
    let page = repo.find_page(2, 2).await.unwrap();

    // Then: Exactly the third and fourth users, in id order
    assert_that!(page.len(), eq(2));
    assert_that!(page[0].email, eq("user2@example.com"));
    assert_that!(page[1].email, eq("user3@example.com"));
}

#[tokio::test]
async fn given_partial_patch_when_updating_then_unset_fields_survive() {
    // Given: A stored user
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let stored = repo
        .insert(&create_test_user("ada@example.com"))
        .await
        .unwrap();

    // When: Patching only age and city
    let patch = UserPatch {
        age: Some(31),
        city: Some("Lyon".to_string()),
        ..Default::default()
    };
    let touched = repo.update_fields(stored.id, &patch).await.unwrap();

    // Then: Supplied fields changed, the rest did not
    assert_that!(touched, eq(true));
    let found = repo.find_by_id(stored.id).await.unwrap().unwrap();
    assert_that!(found.age, eq(31));
    assert_that!(found.city, eq("Lyon"));
    assert_that!(found.name, eq(&stored.name));
    assert_that!(found.email, eq(&stored.email));
    assert_that!(found.interests, eq(&stored.interests));
}

#[tokio::test]
async fn given_identical_patch_when_applied_twice_then_state_is_unchanged() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let stored = repo
        .insert(&create_test_user("ada@example.com"))
        .await
        .unwrap();

    let patch = UserPatch {
        name: Some("Grace".to_string()),
        interests: Some(vec!["skating".to_string()]),
        ..Default::default()
    };

    repo.update_fields(stored.id, &patch).await.unwrap();
    let once = repo.find_by_id(stored.id).await.unwrap().unwrap();

    repo.update_fields(stored.id, &patch).await.unwrap();
    let twice = repo.find_by_id(stored.id).await.unwrap().unwrap();

    assert_that!(twice, eq(&once));
}

#[tokio::test]
async fn given_missing_id_when_updating_then_reports_no_row() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);

    let patch = UserPatch {
        name: Some("Nobody".to_string()),
        ..Default::default()
    };
    let touched = repo.update_fields(42, &patch).await.unwrap();

    assert_that!(touched, eq(false));
}

#[tokio::test]
async fn given_email_held_by_other_user_when_updating_then_fails_with_duplicate() {
    // Given: Two stored users
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    repo.insert(&create_test_user("first@example.com"))
        .await
        .unwrap();
    let second = repo
        .insert(&create_test_user("second@example.com"))
        .await
        .unwrap();

    // When: Re-pointing the second user's email at the first's
    let patch = UserPatch {
        email: Some("first@example.com".to_string()),
        ..Default::default()
    };
    let result = repo.update_fields(second.id, &patch).await;

    // Then: The unique index rejects the write
    assert!(matches!(
        result.unwrap_err(),
        DbError::DuplicateEmail { .. }
    ));
}

#[tokio::test]
async fn given_stored_user_when_deleted_then_gone_and_second_delete_reports_missing() {
    // Given: A stored user
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let stored = repo
        .insert(&create_test_user("ada@example.com"))
        .await
        .unwrap();

    // When: Deleting it
    let deleted = repo.delete(stored.id).await.unwrap();

    // Then: The row is gone and a second delete finds nothing
    assert_that!(deleted, eq(true));
    assert_that!(repo.find_by_id(stored.id).await.unwrap(), none());
    assert_that!(repo.delete(stored.id).await.unwrap(), eq(false));
}

#[tokio::test]
async fn given_deleted_email_when_reused_then_insert_succeeds() {
    // Deleting frees the email for a new profile; only the id is never reused.
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let first = repo
        .insert(&create_test_user("ada@example.com"))
        .await
        .unwrap();
    repo.delete(first.id).await.unwrap();

    let second = repo
        .insert(&create_test_user("ada@example.com"))
        .await
        .unwrap();

    assert_that!(second.id, gt(first.id));
}

#[tokio::test]
async fn given_interests_with_duplicates_when_round_tripped_then_order_and_duplicates_survive() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);

    let user = create_profile(
        "Ada",
        30,
        "female",
        "ada@example.com",
        "Paris",
        &["chess", "music", "chess"],
    );
    let stored = repo.insert(&user).await.unwrap();

    let found = repo.find_by_id(stored.id).await.unwrap().unwrap();
    assert_that!(
        found.interests,
        eq(&vec![
            "chess".to_string(),
            "music".to_string(),
            "chess".to_string()
        ])
    );
}
