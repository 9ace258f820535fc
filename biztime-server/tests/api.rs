//! End-to-end API tests against a real PostgreSQL database.
//!
//! Every test reloads the sample data, so they share one lock.
//! Run with: DATABASE_URL=postgres://... cargo test -p biztime-server -- --ignored

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use biztime_server::db::{create_pool, schema, seed};
use biztime_server::http::{build_router, AppState, ServerConfig};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Router over a freshly seeded database. Hold the guard for the whole test.
async fn seeded_app() -> (Router, MutexGuard<'static, ()>) {
    let guard = DB_LOCK.lock().await;

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    schema::migrate(&pool).await.expect("migration failed");
    seed::load_sample_data(&pool).await.expect("seeding failed");

    (build_router(AppState::new(pool), &ServerConfig::default()), guard)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// === Companies ===

#[tokio::test]
#[ignore = "requires database"]
async fn list_companies() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "GET", "/companies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "companies": [
                {"code": "acme", "name": "ACME"},
                {"code": "test-co", "name": "Test Co."}
            ]
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_company_nests_invoices_and_industries() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "GET", "/companies/acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "company": {
                "code": "acme",
                "name": "ACME",
                "description": "The one from the cartoons",
                "invoices": [{"id": 1}, {"id": 2}],
                "industries": [{"code": "anvils"}, {"code": "bombs"}, {"code": "toons"}]
            }
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_company_only_sees_its_own_invoices() {
    let (app, _lock) = seeded_app().await;

    let (_, body) = call(&app, "GET", "/companies/test-co", None).await;
    assert_eq!(body["company"]["invoices"], json!([{"id": 3}]));
    assert_eq!(
        body["company"]["industries"],
        json!([{"code": "bombs"}, {"code": "widgets"}])
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_unknown_company_is_404() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "GET", "/companies/asdfghjkl", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_company_derives_code_from_name() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/companies",
        Some(json!({"name": "Duff Beer Co.", "description": "Homer's favorite beer"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "company": {
                "code": "duff-beer-co",
                "name": "Duff Beer Co.",
                "description": "Homer's favorite beer"
            }
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_company_named_test_co_gets_test_co() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "DELETE", "/companies/test-co", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        "POST",
        "/companies",
        Some(json!({"name": "Test Co.", "description": "back again"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["company"]["code"], "test-co");
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_company_transliterates_name() {
    let (app, _lock) = seeded_app().await;

    for (name, code) in [
        ("Café Ünited", "cafe-united"),
        ("Émile Co", "emile-co"),
        ("東京電力", "dong-jing-dian-li"),
    ] {
        let (status, body) = call(&app, "POST", "/companies", Some(json!({"name": name}))).await;
        assert_eq!(status, StatusCode::CREATED, "{name}");
        assert_eq!(body["company"]["code"], code);
        assert_eq!(body["company"]["name"], name);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_company_with_explicit_code() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/companies",
        Some(json!({"code": "duff", "name": "Duff Beer Co."})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["company"]["code"], "duff");
    assert_eq!(body["company"]["description"], Value::Null);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_company_with_taken_code_is_500() {
    let (app, _lock) = seeded_app().await;

    // "Test Co!" slugifies to the seeded "test-co"
    let (status, body) = call(
        &app,
        "POST",
        "/companies",
        Some(json!({"name": "Test Co!", "description": "impostor"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "constraint_violation");
}

#[tokio::test]
#[ignore = "requires database"]
async fn storage_errors_report_database_message() {
    let (app, _lock) = seeded_app().await;

    // PostgreSQL refuses NUL bytes in text parameters
    let (status, body) = call(&app, "GET", "/companies/a%00b", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(
        body["message"].as_str().unwrap().contains("0x00"),
        "{body}"
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_company() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(
        &app,
        "PUT",
        "/companies/acme",
        Some(json!({"name": "ACMEEdit", "description": "ACME, but different"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "company": {
                "code": "acme",
                "name": "ACMEEdit",
                "description": "ACME, but different"
            }
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_unknown_company_is_404() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(
        &app,
        "PUT",
        "/companies/asdfghjkl",
        Some(json!({"name": "whatever", "description": "irrelevant"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_company_missing_fields_is_500() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "PUT", "/companies/acme", Some(json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_company_cascades_and_then_404s() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "DELETE", "/companies/acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted"}));

    let (status, _) = call(&app, "GET", "/companies/acme", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&app, "GET", "/invoices", None).await;
    assert_eq!(body, json!({"invoices": [{"id": 3, "comp_code": "test-co"}]}));

    let (status, _) = call(&app, "DELETE", "/companies/acme", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// === Invoices ===

#[tokio::test]
#[ignore = "requires database"]
async fn list_invoices_uses_invoices_key() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "GET", "/invoices", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "invoices": [
                {"id": 1, "comp_code": "acme"},
                {"id": 2, "comp_code": "acme"},
                {"id": 3, "comp_code": "test-co"}
            ]
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_invoice_nests_company() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "GET", "/invoices/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "invoice": {
                "id": 1,
                "amt": 150.0,
                "paid": false,
                "add_date": "2021-03-16",
                "paid_date": null,
                "company": {
                    "code": "acme",
                    "name": "ACME",
                    "description": "The one from the cartoons"
                }
            }
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_unknown_invoice_is_404() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "GET", "/invoices/525600", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_invoice_defaults() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/invoices",
        Some(json!({"comp_code": "test-co", "amt": 400})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let invoice = &body["invoice"];
    assert_eq!(invoice["id"], 4);
    assert_eq!(invoice["comp_code"], "test-co");
    assert_eq!(invoice["amt"], 400.0);
    assert_eq!(invoice["paid"], false);
    assert_eq!(invoice["paid_date"], Value::Null);
    assert!(invoice["add_date"].is_string());
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_invoice_for_unknown_company_is_500() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/invoices",
        Some(json!({"comp_code": "nope", "amt": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "constraint_violation");
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_invoice_without_amount_is_500() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "POST", "/invoices", Some(json!({"comp_code": "acme"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "constraint_violation");
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_invoice_with_non_positive_amount_is_500() {
    let (app, _lock) = seeded_app().await;

    for amt in [0, -5] {
        let (status, body) = call(
            &app,
            "POST",
            "/invoices",
            Some(json!({"comp_code": "acme", "amt": amt})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "amt {amt}");
        assert_eq!(body["error"], "constraint_violation");
    }

    let (_, body) = call(&app, "GET", "/invoices", None).await;
    assert_eq!(body["invoices"].as_array().unwrap().len(), 3);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_invoice_changes_amount_only() {
    let (app, _lock) = seeded_app().await;

    // Invoice 2 is seeded as paid on 2021-02-28; `paid` in the body is ignored
    let (status, body) = call(
        &app,
        "PUT",
        "/invoices/2",
        Some(json!({"amt": 500, "paid": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "invoice": {
                "id": 2,
                "comp_code": "acme",
                "amt": 500.0,
                "paid": true,
                "add_date": "2021-02-01",
                "paid_date": "2021-02-28"
            }
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_unknown_invoice_is_404() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "PUT", "/invoices/525600", Some(json!({"amt": 42}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_invoice_missing_amount_is_500() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "PUT", "/invoices/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_invoice_then_404() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "DELETE", "/invoices/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted"}));

    let (status, _) = call(&app, "GET", "/invoices/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// === Industries ===

#[tokio::test]
#[ignore = "requires database"]
async fn list_industries() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "GET", "/industries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "industries": [
                {"code": "anvils", "industry": "Cartoon anvils"},
                {"code": "bombs", "industry": "Explosives and bombs"},
                {"code": "toons", "industry": "Cartoons"},
                {"code": "widgets", "industry": "Widgets and gadgets"}
            ]
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_industry_lists_companies() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "GET", "/industries/toons", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "code": "toons",
            "industry": "Cartoons",
            "companies": [{"code": "acme", "name": "ACME"}]
        })
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn industry_without_companies_is_found() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(
        &app,
        "POST",
        "/industries",
        Some(json!({"code": "sports", "industry": "Sporting goods"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, "GET", "/industries/sports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": "sports", "industry": "Sporting goods", "companies": []})
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_unknown_industry_is_404() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "GET", "/industries/asdfghjkl", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_industry() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/industries",
        Some(json!({"code": "sports", "industry": "Sporting goods"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"industry": {"code": "sports", "industry": "Sporting goods"}})
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_duplicate_industry_is_500() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(
        &app,
        "POST",
        "/industries",
        Some(json!({"code": "toons", "industry": "Duplicate entry"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "requires database"]
async fn associate_company_with_industry() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "POST", "/industries/widgets/add/acme", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"comp_ind": {"comp_code": "acme", "ind_code": "widgets"}})
    );

    let (_, body) = call(&app, "GET", "/industries/widgets", None).await;
    assert_eq!(
        body["companies"],
        json!([{"code": "acme", "name": "ACME"}, {"code": "test-co", "name": "Test Co."}])
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn associate_unknown_company_is_500() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "POST", "/industries/widgets/add/asdfghjkl", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "requires database"]
async fn associate_unknown_industry_is_500() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "POST", "/industries/nope/add/acme", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "constraint_violation");

    let (_, body) = call(&app, "GET", "/companies/acme", None).await;
    assert_eq!(
        body["company"]["industries"],
        json!([{"code": "anvils"}, {"code": "bombs"}, {"code": "toons"}])
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn repeated_association_is_500() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "POST", "/industries/toons/add/acme", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_industry_removes_links() {
    let (app, _lock) = seeded_app().await;

    let (status, body) = call(&app, "DELETE", "/industries/toons", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted"}));

    let (status, _) = call(&app, "GET", "/industries/toons", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&app, "GET", "/companies/acme", None).await;
    assert_eq!(
        body["company"]["industries"],
        json!([{"code": "anvils"}, {"code": "bombs"}])
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_unknown_industry_is_404() {
    let (app, _lock) = seeded_app().await;

    let (status, _) = call(&app, "DELETE", "/industries/asdfghjkl", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
