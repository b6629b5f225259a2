mod helpers;

use actix_web::test;
use api::create_app;
use common::Role;
use serde_json::json;

#[actix_web::test]
async fn admin_user_management_procedures() {
    let state = helpers::test_state().await;
    let (_admin_id, admin_token) =
        helpers::seed_user(&state, "admin@example.com", "Admin", Role::Admin).await;
    let app = test::init_service(create_app(state.clone())).await;

    // Create a vet account; it receives the fixed default password.
    let req = test::TestRequest::post()
        .uri("/admin/users")
        .insert_header(helpers::bearer(&admin_token))
        .set_json(json!({ "email": "vet@example.com", "name": "Dr. Cruz", "role": "vet" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User created successfully!");
    let vet_id = body["user"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "vet@example.com", "password": auth::DEFAULT_PASSWORD }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    // Edit name and role.
    let req = test::TestRequest::put()
        .uri(&format!("/admin/users/{vet_id}"))
        .insert_header(helpers::bearer(&admin_token))
        .set_json(json!({ "name": "Dr. J. Cruz", "role": "groomer" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["name"], "Dr. J. Cruz");
    assert_eq!(body["user"]["role"], "groomer");

    // Reset link for an existing account.
    let req = test::TestRequest::post()
        .uri("/admin/users/reset-password")
        .insert_header(helpers::bearer(&admin_token))
        .set_json(json!({ "email": "vet@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let link = body["link"].as_str().unwrap();
    assert!(link.starts_with("http://localhost:3000/reset-password?token="));
    let token = link.rsplit("token=").next().unwrap();
    let claims = auth::verify_reset(&state.jwt, token).expect("reset token");
    assert_eq!(claims.email, "vet@example.com");

    // Unknown email: 404.
    let req = test::TestRequest::post()
        .uri("/admin/users/reset-password")
        .insert_header(helpers::bearer(&admin_token))
        .set_json(json!({ "email": "ghost@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    // Delete, twice: second is a 404.
    let req = test::TestRequest::delete()
        .uri(&format!("/admin/users/{vet_id}"))
        .insert_header(helpers::bearer(&admin_token))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
    let req = test::TestRequest::delete()
        .uri(&format!("/admin/users/{vet_id}"))
        .insert_header(helpers::bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn admin_routes_forbidden_for_other_roles() {
    let state = helpers::test_state().await;
    let (_client_id, client_token) =
        helpers::seed_user(&state, "client@example.com", "Client", Role::Client).await;
    let (_vet_id, vet_token) =
        helpers::seed_user(&state, "vet@example.com", "Vet", Role::Vet).await;
    let app = test::init_service(create_app(state)).await;

    for token in [&client_token, &vet_token] {
        let req = test::TestRequest::get()
            .uri("/admin/users")
            .insert_header(helpers::bearer(token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);
    }

    let req = test::TestRequest::post()
        .uri("/admin/users")
        .insert_header(helpers::bearer(&client_token))
        .set_json(json!({ "email": "x@example.com", "name": "X", "role": "admin" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);
}

#[actix_web::test]
async fn overview_counts_and_service_catalog() {
    let state = helpers::test_state().await;
    let (client_id, client_token) =
        helpers::seed_user(&state, "client@example.com", "Client", Role::Client).await;
    let (_admin_id, admin_token) =
        helpers::seed_user(&state, "admin@example.com", "Admin", Role::Admin).await;
    helpers::seed_pet(&state.db, &client_id, "Rex").await;
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/appointments")
        .insert_header(helpers::bearer(&client_token))
        .set_json(json!({
            "pet_name": "Rex",
            "service": "Deworm",
            "date": "2025-03-19",
            "time": "09:00 AM"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::get()
        .uri("/admin/overview")
        .insert_header(helpers::bearer(&admin_token))
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["users"], 2);
    assert_eq!(body["pets"], 1);
    assert_eq!(body["appointments"], 1);
    assert_eq!(body["payments"], 0);

    let req = test::TestRequest::get()
        .uri("/services")
        .insert_header(helpers::bearer(&client_token))
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let services = body.as_array().unwrap();
    assert_eq!(services.len(), 7);
    assert!(services.iter().any(|s| s["name"] == "Check-up" && s["price"] == 500));

    // Schedules listing is admin-only but add+list round-trips.
    let req = test::TestRequest::post()
        .uri("/admin/schedules")
        .insert_header(helpers::bearer(&admin_token))
        .set_json(json!({ "date": "2025-03-21", "time": "10:00 AM" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);
    let req = test::TestRequest::get()
        .uri("/admin/schedules")
        .insert_header(helpers::bearer(&admin_token))
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["date"], "2025-03-21");
    assert_eq!(rows[0]["is_booked"], false);

    // Missing time: validation error.
    let req = test::TestRequest::post()
        .uri("/admin/schedules")
        .insert_header(helpers::bearer(&admin_token))
        .set_json(json!({ "date": "2025-03-21", "time": "" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}
