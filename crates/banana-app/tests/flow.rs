//! End-to-end flows through the runtime against a mock backend.

use banana_app::Runtime;
use banana_app::events::UiEvent;
use banana_app::state::{AuthMode, NoticeLevel, View};
use banana_core::api::{ApiClient, LogoutMode};
use banana_core::session::{MemoryStorage, SessionStore};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runtime_against(server: &MockServer) -> Runtime<MemoryStorage> {
    Runtime::new(
        ApiClient::new(&server.uri()),
        SessionStore::new(MemoryStorage::default()),
    )
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/banana/login/"))
        .and(body_json(json!({ "username": "rex", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "a1", "refresh": "r1", "username": "rex"
        })))
        .mount(server)
        .await;
}

async fn login(runtime: &mut Runtime<MemoryStorage>) {
    runtime.dispatch(UiEvent::SelectAuth(AuthMode::Login)).await;
    runtime
        .dispatch(UiEvent::SubmitLogin {
            username: "rex".to_string(),
            password: "pw".to_string(),
        })
        .await;
}

#[tokio::test]
async fn login_play_rank_logout_round_trip() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/banana/leaderboard/"))
        .and(bearer_token("a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "username": "zed", "score": 900 },
            { "username": "rex", "score": 42 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/banana/logout/"))
        .and(bearer_token("a1"))
        .and(body_json(json!({ "refresh": "r1" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut runtime = runtime_against(&server);
    assert_eq!(runtime.state().view, View::Landing);

    login(&mut runtime).await;
    assert_eq!(runtime.state().view, View::Playing);
    assert_eq!(runtime.state().username.as_deref(), Some("rex"));
    assert!(runtime.store().session().is_authenticated());

    runtime.dispatch(UiEvent::ActivityCompleted { score: 42 }).await;
    assert_eq!(runtime.state().view, View::Leaderboard { score: 42 });
    let names: Vec<&str> = runtime
        .state()
        .entries
        .iter()
        .map(|e| e.username.as_str())
        .collect();
    assert_eq!(names, ["zed", "rex"]);

    runtime
        .dispatch(UiEvent::LogoutRequested {
            mode: LogoutMode::Standard,
        })
        .await;
    assert_eq!(runtime.state().view, View::Landing);
    assert!(runtime.state().username.is_none());
    assert!(!runtime.store().session().is_authenticated());
}

#[tokio::test]
async fn server_side_logout_failure_still_logs_out_locally() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/banana/logout/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "detail": "Token blacklist down." })),
        )
        .mount(&server)
        .await;

    let mut runtime = runtime_against(&server);
    login(&mut runtime).await;
    runtime.state_mut().drain_notices();

    runtime
        .dispatch(UiEvent::LogoutRequested {
            mode: LogoutMode::Standard,
        })
        .await;

    assert_eq!(runtime.state().view, View::Landing);
    assert!(!runtime.store().session().is_authenticated());
    let notices = runtime.state_mut().drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.contains("Token blacklist down."));
    assert!(notices[0].message.contains("logged out locally"));
}

#[tokio::test]
async fn expired_session_on_the_leaderboard_forces_a_fresh_login() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/banana/leaderboard/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut runtime = runtime_against(&server);
    login(&mut runtime).await;
    runtime.state_mut().drain_notices();

    runtime.dispatch(UiEvent::ActivityCompleted { score: 7 }).await;

    assert_eq!(runtime.state().view, View::Landing);
    assert!(runtime.state().username.is_none());
    // The dead credentials were dropped, so the next startup cannot
    // route back into the expired session.
    assert!(!runtime.store().session().is_authenticated());
    let notices = runtime.state_mut().drain_notices();
    assert!(notices[0].message.contains("Session expired"));
}

#[tokio::test]
async fn logout_all_hits_the_global_endpoint() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/banana/logout-all/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut runtime = runtime_against(&server);
    login(&mut runtime).await;

    runtime
        .dispatch(UiEvent::LogoutRequested {
            mode: LogoutMode::All,
        })
        .await;
    assert_eq!(runtime.state().view, View::Landing);
    assert!(!runtime.store().session().is_authenticated());
}

#[tokio::test]
async fn registration_flows_straight_into_playing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/banana/register/"))
        .and(body_json(json!({
            "username": "rex",
            "email": "rex@example.com",
            "password": "pw",
            "confirm_password": "pw"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access": "a1", "refresh": "r1", "username": "rex"
        })))
        .mount(&server)
        .await;

    let mut runtime = runtime_against(&server);
    runtime
        .dispatch(UiEvent::SelectAuth(AuthMode::Register))
        .await;
    runtime
        .dispatch(UiEvent::SubmitRegister {
            username: "rex".to_string(),
            email: "rex@example.com".to_string(),
            password: "pw".to_string(),
            confirm_password: "pw".to_string(),
        })
        .await;

    assert_eq!(runtime.state().view, View::Playing);
    assert!(runtime.store().session().is_authenticated());
}
