mod common;

use std::time::Duration;

use common::{author, create_author, create_paper, paper_body, test_app, timestamp};
use serde_json::{json, Value};

const SOLE_AUTHOR: &str = "Cannot delete author: they are the only author of one or more papers";

#[tokio::test]
async fn create_author_stores_optional_fields_as_null() {
    let app = test_app().await;
    let created = app
        .post("/api/authors")
        .json(&json!({ "name": "Ada Lovelace", "affiliation": 12 }))
        .send()
        .await
        .assert_created()
        .assert_json("/name", "Ada Lovelace")
        .assert_json("/email", Value::Null)
        .assert_json("/affiliation", Value::Null)
        .assert_json_len("/papers", 0);
    let id: i64 = created.json_at("/id");

    app.get(&format!("/api/authors/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json("/name", "Ada Lovelace");
}

#[tokio::test]
async fn create_author_requires_a_name() {
    let app = test_app().await;
    for body in [json!({}), json!({ "name": "  " }), json!({ "name": null }), json!({ "name": 5 })] {
        app.post("/api/authors")
            .json(&body)
            .send()
            .await
            .assert_bad_request()
            .assert_json("", json!({ "error": "Validation Error", "messages": ["Name is required"] }));
    }
}

#[tokio::test]
async fn create_author_never_deduplicates() {
    let app = test_app().await;
    let body = author("Twin", Some("t@x.org"), Some("Lab"));
    let first = create_author(&app, body.clone()).await;
    let second = create_author(&app, body).await;
    assert_ne!(first, second);
    app.get("/api/authors").send().await.assert_json("/total", 2);
}

#[tokio::test]
async fn author_includes_papers_without_nesting() {
    let app = test_app().await;
    let ada = author("Ada", None, Some("Analytical Society"));
    create_paper(&app, paper_body("Notes", "Taylor", 1901, vec![ada.clone()])).await;
    create_paper(&app, paper_body("Sketch", "Taylor", 1902, vec![ada, author("Babbage", None, None)])).await;

    let id: i64 = app
        .get("/api/authors?name=ada")
        .send()
        .await
        .assert_json("/total", 1)
        .json_at("/authors/0/id");

    app.get(&format!("/api/authors/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_len("/papers", 2)
        .assert_json("/papers/0/title", "Notes")
        .assert_json("/papers/1/title", "Sketch")
        .assert_json("/papers/0/authors", Value::Null);
}

#[tokio::test]
async fn list_filters_by_name_and_affiliation() {
    let app = test_app().await;
    create_author(&app, author("Alice Smith", None, Some("MIT"))).await;
    create_author(&app, author("Bob Smith", None, Some("Stanford"))).await;
    create_author(&app, author("Carol Jones", None, Some("mit media lab"))).await;

    app.get("/api/authors?name=SMITH")
        .send()
        .await
        .assert_json("/total", 2);
    app.get("/api/authors?affiliation=mit")
        .send()
        .await
        .assert_json("/total", 2)
        .assert_json("/authors/0/name", "Alice Smith")
        .assert_json("/authors/1/name", "Carol Jones");
    app.get("/api/authors?name=smith&affiliation=MIT")
        .send()
        .await
        .assert_json("/total", 1);
    app.get("/api/authors?name=&limit=2&offset=1")
        .send()
        .await
        .assert_json("/total", 3)
        .assert_json("/limit", 2)
        .assert_json("/offset", 1)
        .assert_json_len("/authors", 2)
        .assert_json("/authors/0/name", "Bob Smith");
}

#[tokio::test]
async fn list_rejects_bad_pagination() {
    let app = test_app().await;
    for query in ["limit=101", "limit=abc", "offset=-5", "offset="] {
        app.get(&format!("/api/authors?{query}"))
            .send()
            .await
            .assert_bad_request()
            .assert_json("/message", "Invalid query parameter format");
    }
}

#[tokio::test]
async fn update_author() {
    let app = test_app().await;
    let created = app
        .post("/api/authors")
        .json(&author("Draft Name", Some("a@b.c"), None))
        .send()
        .await
        .assert_created();
    let id: i64 = created.json_at("/id");
    let created_at: String = created.json_at("/createdAt");
    let first_updated_at: String = created.json_at("/updatedAt");
    tokio::time::sleep(Duration::from_millis(20)).await;

    let updated = app
        .put(&format!("/api/authors/{id}"))
        .json(&json!({ "name": "Final Name", "affiliation": "ETH" }))
        .send()
        .await
        .assert_ok()
        .assert_json("/id", id)
        .assert_json("/name", "Final Name")
        .assert_json("/email", Value::Null)
        .assert_json("/affiliation", "ETH")
        .assert_json("/createdAt", created_at.as_str());
    let updated_at: String = updated.json_at("/updatedAt");
    assert!(
        timestamp(&updated_at) > timestamp(&first_updated_at),
        "{updated_at} should be after {first_updated_at}"
    );

    app.put(&format!("/api/authors/{id}"))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .assert_bad_request()
        .assert_json("/messages", json!(["Name is required"]));

    app.put("/api/authors/777")
        .json(&json!({ "name": "Nobody" }))
        .send()
        .await
        .assert_not_found()
        .assert_json("", json!({ "error": "Author not found" }));

    app.put("/api/authors/abc")
        .json(&json!({}))
        .send()
        .await
        .assert_bad_request()
        .assert_json("/message", "Invalid ID format");
}

#[tokio::test]
async fn sole_author_cannot_be_deleted() {
    let app = test_app().await;
    let paper = create_paper(&app, paper_body("Solo", "V", 2000, vec![author("Lonely", None, None)])).await;
    let id: i64 = app
        .get(&format!("/api/papers/{paper}"))
        .send()
        .await
        .json_at("/authors/0/id");

    app.delete(&format!("/api/authors/{id}"))
        .send()
        .await
        .assert_bad_request()
        .assert_json("", json!({ "error": "Constraint Error", "message": SOLE_AUTHOR }));

    app.get(&format!("/api/authors/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_len("/papers", 1);
}

#[tokio::test]
async fn co_author_can_be_deleted() {
    let app = test_app().await;
    let paper = create_paper(
        &app,
        paper_body("Duo", "V", 2000, vec![author("Keep", None, None), author("Drop", None, None)]),
    )
    .await;
    let drop_id: i64 = app
        .get("/api/authors?name=drop")
        .send()
        .await
        .json_at("/authors/0/id");

    app.delete(&format!("/api/authors/{drop_id}")).send().await.assert_no_content();
    app.get(&format!("/api/authors/{drop_id}"))
        .send()
        .await
        .assert_not_found()
        .assert_json("/error", "Author not found");

    app.get(&format!("/api/papers/{paper}"))
        .send()
        .await
        .assert_ok()
        .assert_json_len("/authors", 1)
        .assert_json("/authors/0/name", "Keep");
}

#[tokio::test]
async fn delete_author_without_papers_and_missing_ids() {
    let app = test_app().await;
    let id = create_author(&app, author("Free", None, None)).await;
    app.delete(&format!("/api/authors/{id}")).send().await.assert_no_content();
    app.delete(&format!("/api/authors/{id}")).send().await.assert_not_found();
    app.delete("/api/authors/-1")
        .send()
        .await
        .assert_bad_request()
        .assert_json("/message", "Invalid ID format");
}
