use bubbletime::auth::{AuthContext, Session};
use bubbletime::catalog::StorefrontSource;
use bubbletime::error::Error;
use bubbletime::pages::{favorites, leaderboard, menu, ViewState};
use bubbletime::BubbleTime;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn categories() -> Value {
    json!([
        { "id": "c-drinks", "name": "Signature Drinks" },
        { "id": "c-food", "name": "Light Food" }
    ])
}

fn menu_item(id: &str, name: &str, price: f64, category_id: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "category_id": category_id,
        "image_url": format!("{}.jpg", id)
    })
}

fn favorite(id: &str, user: &str, item: Value) -> Value {
    json!({
        "id": id,
        "user_id": user,
        "menuitem_id": item["id"].clone(),
        "menuitem": item
    })
}

async fn mount_categories(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(header("apikey", "anon"))
        .and(query_param("select", "id,name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn catalog_decodes_joined_favorites() {
    let mock_server = MockServer::start().await;

    let tea = menu_item("m-tea", "Brown Sugar Milk Tea", 7.9, "c-drinks");
    Mock::given(method("GET"))
        .and(path("/rest/v1/favourites"))
        .and(query_param(
            "select",
            "id,menuitem_id,user_id,menuitem(id,name,price,category_id,image_url)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            favorite("f1", "u1", tea),
            { "id": "f2", "user_id": "u2", "menuitem_id": "m-gone", "menuitem": null }
        ])))
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let records = shop.catalog().favorites().await.expect("favorites");

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].menu_item.as_ref().map(|i| i.name.as_str()),
        Some("Brown Sugar Milk Tea")
    );
    assert!(records[1].menu_item.is_none());
}

#[tokio::test]
async fn menu_page_groups_by_category() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/menuitem"))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            menu_item("m-tea", "Brown Sugar Milk Tea", 7.9, "c-drinks"),
            menu_item("m-toast", "Kaya Toast", 4.5, "c-food")
        ])))
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let storage = shop.storage();
    let images = storage.from(shop.image_bucket());

    let state = menu::load(&shop.catalog(), &images).await;
    let page = state.ready().expect("menu");

    assert_eq!(page.sections.len(), 2);
    assert_eq!(page.sections[0].category, "Signature Drinks");
    assert_eq!(page.sections[0].items[0].price_label, "RM 7.90");
    assert_eq!(
        page.sections[1].items[0].image_url,
        Some(format!(
            "{}/storage/v1/object/public/bubbletimeimage/m-toast.jpg",
            mock_server.uri()
        ))
    );
}

#[tokio::test]
async fn favorites_page_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server).await;

    let tea = menu_item("m-tea", "Brown Sugar Milk Tea", 7.9, "c-drinks");
    let matcha = menu_item("m-matcha", "Matcha Latte", 9.5, "c-drinks");
    let toast = menu_item("m-toast", "Kaya Toast", 4.5, "c-food");
    Mock::given(method("GET"))
        .and(path("/rest/v1/favourites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            favorite("f1", "u1", matcha.clone()),
            favorite("f2", "u1", tea.clone()),
            favorite("f3", "u2", tea.clone()),
            favorite("f4", "u3", tea),
            favorite("f5", "u2", toast),
            { "id": "f6", "user_id": "u4", "menuitem_id": null, "menuitem": null }
        ])))
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let storage = shop.storage();
    let images = storage.from(shop.image_bucket());
    let catalog = shop.catalog();

    let state = favorites::load(&catalog, &images).await;
    let page = state.ready().expect("favorites");

    let drinks: Vec<(usize, &str, usize)> = page
        .drinks
        .iter()
        .map(|c| (c.rank, c.name.as_str(), c.favorite_count))
        .collect();
    assert_eq!(
        drinks,
        vec![(1, "Brown Sugar Milk Tea", 3), (2, "Matcha Latte", 1)]
    );
    assert_eq!(page.food.len(), 1);
    assert_eq!(page.food[0].price_label, "RM 4.50");

    let rows = leaderboard::load(&catalog, &images).await;
    let rows = rows.ready().expect("leaderboard");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].category_name, "Signature Drinks");
    assert_eq!(rows[2].card.name, "Kaya Toast");
}

#[tokio::test]
async fn failed_category_fetch_skips_favorites() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/favourites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let storage = shop.storage();
    let images = storage.from(shop.image_bucket());

    let state = favorites::load(&shop.catalog(), &images).await;
    assert_eq!(state, ViewState::Failed("Failed to load favorites".to_string()));
}

#[tokio::test]
async fn sign_in_then_favorite() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": { "id": "u1", "email": "pearl@example.com" }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/favourites"))
        .and(header("authorization", "Bearer user-token"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!({ "user_id": "u1", "menuitem_id": "m-tea" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": "f1", "user_id": "u1", "menuitem_id": "m-tea" }
        ])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/favourites"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })))
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let ctx = shop
        .auth()
        .sign_in("pearl@example.com", "password123")
        .await
        .expect("sign in");

    assert!(ctx.is_signed_in());
    assert_eq!(ctx.email(), Some("pearl@example.com"));

    let catalog = shop.catalog();
    assert!(catalog.add_favorite(&ctx, "m-tea").await.expect("first add"));
    assert!(!catalog.add_favorite(&ctx, "m-tea").await.expect("second add"));
}

#[tokio::test]
async fn anonymous_users_cannot_favorite() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/favourites"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let err = shop
        .catalog()
        .add_favorite(&AuthContext::Anonymous, "m-tea")
        .await
        .expect_err("anonymous add should fail");

    assert!(matches!(err, Error::Auth(_)), "got {:?}", err);
}

#[tokio::test]
async fn remove_favorite_filters_by_user_and_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token",
            "expires_in": 3600,
            "user": { "id": "u1" }
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/favourites"))
        .and(query_param("user_id", "eq.u1"))
        .and(query_param("menuitem_id", "eq.m-tea"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let ctx = shop.auth().sign_in("a@example.com", "pw").await.expect("sign in");

    shop.catalog()
        .remove_favorite(&ctx, "m-tea")
        .await
        .expect("remove favorite");
}

async fn sign_in(server: &MockServer, shop: &BubbleTime) -> AuthContext {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-1",
            "user": { "id": "u1", "email": "pearl@example.com" }
        })))
        .mount(server)
        .await;

    shop.auth()
        .sign_in("pearl@example.com", "password123")
        .await
        .expect("sign in")
}

#[tokio::test]
async fn menu_items_in_filters_by_category() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/menuitem"))
        .and(query_param("category_id", "eq.c-food"))
        .and(query_param("order", "name.asc"))
        .and(header("authorization", "Bearer anon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            menu_item("m-toast", "Kaya Toast", 4.5, "c-food")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let items = shop.catalog().menu_items_in("c-food").await.expect("items");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Kaya Toast");
}

#[tokio::test]
async fn search_menu_matches_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/menuitem"))
        .and(query_param("name", "ilike.*milk tea*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            menu_item("m-tea", "Brown Sugar Milk Tea", 7.9, "c-drinks")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let items = shop.catalog().search_menu(" milk tea ").await.expect("search");

    assert_eq!(items[0].id, "m-tea");
}

#[tokio::test]
async fn menu_item_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/menuitem"))
        .and(query_param("id", "eq.m-tea"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            menu_item("m-tea", "Brown Sugar Milk Tea", 7.9, "c-drinks")
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/menuitem"))
        .and(query_param("id", "eq.m-none"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let catalog = BubbleTime::new(&mock_server.uri(), "anon").catalog();

    let item = catalog.menu_item("m-tea").await.expect("lookup");
    assert_eq!(item.map(|i| i.name), Some("Brown Sugar Milk Tea".to_string()));
    assert!(catalog.menu_item("m-none").await.expect("lookup").is_none());
}

#[tokio::test]
async fn favorites_of_one_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/favourites"))
        .and(query_param("user_id", "eq.u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            favorite("f1", "u1", menu_item("m-tea", "Brown Sugar Milk Tea", 7.9, "c-drinks"))
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let records = shop.catalog().favorites_of("u1").await.expect("favorites");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].menuitem_id.as_deref(), Some("m-tea"));
}

#[tokio::test]
async fn is_favorite_checks_the_users_row() {
    let mock_server = MockServer::start().await;
    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let ctx = sign_in(&mock_server, &shop).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/favourites"))
        .and(header("authorization", "Bearer user-token"))
        .and(query_param("user_id", "eq.u1"))
        .and(query_param("menuitem_id", "eq.m-tea"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "f1", "user_id": "u1", "menuitem_id": "m-tea" }
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/favourites"))
        .and(query_param("menuitem_id", "eq.m-matcha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let catalog = shop.catalog();
    assert!(catalog.is_favorite(&ctx, "m-tea").await.expect("check"));
    assert!(!catalog.is_favorite(&ctx, "m-matcha").await.expect("check"));
}

#[tokio::test]
async fn expired_and_anonymous_sessions_are_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/favourites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let catalog = BubbleTime::new(&mock_server.uri(), "anon").catalog();
    let expired = AuthContext::SignedIn(Session::new(
        "old-token".to_string(),
        None,
        "u1".to_string(),
        -60,
    ));

    for ctx in [expired, AuthContext::Anonymous] {
        let err = catalog
            .is_favorite(&ctx, "m-tea")
            .await
            .expect_err("should be rejected");
        assert!(matches!(err, Error::Auth(_)), "got {:?}", err);
    }
}

#[tokio::test]
async fn refresh_exchanges_the_refresh_token() {
    let mock_server = MockServer::start().await;
    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let ctx = sign_in(&mock_server, &shop).await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(header("apikey", "anon"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token-2",
            "expires_in": 3600,
            "refresh_token": "refresh-2",
            "user": { "id": "u1", "email": "pearl@example.com" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let refreshed = shop.auth().refresh(&ctx).await.expect("refresh");
    let session = refreshed.require().expect("session");
    assert_eq!(session.access_token, "user-token-2");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-2"));

    let err = shop
        .auth()
        .refresh(&AuthContext::Anonymous)
        .await
        .expect_err("nothing to refresh");
    assert!(matches!(err, Error::Auth(_)), "got {:?}", err);
}

#[tokio::test]
async fn sign_up_posts_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(header("apikey", "anon"))
        .and(body_json(json!({ "email": "new@example.com", "password": "password123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": "u9", "email": "new@example.com" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let response = shop
        .auth()
        .sign_up("new@example.com", "password123")
        .await
        .expect("sign up");

    assert!(response.access_token.is_none());
    assert_eq!(response.user.map(|u| u.id), Some("u9".to_string()));
}

#[tokio::test]
async fn get_user_and_sign_out_use_the_users_token() {
    let mock_server = MockServer::start().await;
    let shop = BubbleTime::new(&mock_server.uri(), "anon");
    let ctx = sign_in(&mock_server, &shop).await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "pearl@example.com",
            "role": "authenticated"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = shop.auth();
    let user = auth.get_user(&ctx).await.expect("user");
    assert_eq!(user.email.as_deref(), Some("pearl@example.com"));

    let signed_out = auth.sign_out(&ctx).await.expect("sign out");
    assert_eq!(signed_out, AuthContext::Anonymous);

    let err = auth.sign_out(&signed_out).await.expect_err("already signed out");
    assert!(matches!(err, Error::Auth(_)), "got {:?}", err);
}
