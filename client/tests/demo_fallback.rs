//! Behaviour when the backend cannot be reached at all.

use std::sync::Arc;
use std::time::Duration;

use shared::{
    CreateSwapRequest, LoginRequest, RegisterRequest, SwapStatus, UserRef, UserSearchParams,
};
use skillswap::services::mock::{DEMO_USER_ID, MOCK_TOKEN};
use skillswap::session::{MemoryTokenStore, TokenStore};
use skillswap::{ApiClient, ClientConfig, ClientError, SkillSwapApi};

/// Nothing listens on port 1, so every call is refused immediately.
fn offline() -> (ApiClient, Arc<MemoryTokenStore>) {
    let config = ClientConfig {
        api_base_url: "http://127.0.0.1:1/api".to_string(),
        request_timeout: Duration::from_secs(2),
        mock_latency: Duration::ZERO,
        ..Default::default()
    };
    let tokens = Arc::new(MemoryTokenStore::new());
    (ApiClient::new(&config, tokens.clone()), tokens)
}

fn demo_credentials() -> LoginRequest {
    LoginRequest {
        email: "demo@example.com".to_string(),
        password: "password123".to_string(),
    }
}

#[tokio::test]
async fn login_is_served_from_demo_data_and_stores_token() {
    let (api, tokens) = offline();

    let served = api.login(&demo_credentials()).await;
    assert!(served.is_mocked());
    assert!(api.is_demo_mode());

    let auth = served.into_result().unwrap();
    assert_eq!(auth.user.email, "demo@example.com");
    assert_eq!(auth.token, MOCK_TOKEN);
    assert_eq!(tokens.load().as_deref(), Some(MOCK_TOKEN));
}

#[tokio::test]
async fn demo_login_has_live_shape() {
    let (api, _) = offline();
    let auth = api.login(&demo_credentials()).await.into_result().unwrap();

    // Same JSON schema as a backend response
    let json = serde_json::to_string(&auth).unwrap();
    let reparsed: shared::AuthResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, auth);
}

#[tokio::test]
async fn validation_runs_before_any_network_call() {
    let (api, tokens) = offline();
    let served = api
        .register(&RegisterRequest {
            username: "bella".to_string(),
            email: "bella@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
            ..Default::default()
        })
        .await;

    assert_eq!(
        served.into_result().unwrap_err(),
        ClientError::Validation("Passwords don't match".to_string())
    );
    // No fallback happened, so demo mode was never entered
    assert!(!api.is_demo_mode());
    assert!(tokens.load().is_none());
}

#[tokio::test]
async fn current_user_without_token_is_not_authenticated() {
    let (api, _) = offline();
    assert!(matches!(
        SkillSwapApi::current_user(&api).await,
        Err(ClientError::Authentication(_))
    ));
}

#[tokio::test]
async fn logout_clears_token_when_offline() {
    let (api, tokens) = offline();
    api.login(&demo_credentials()).await.into_result().unwrap();
    assert!(tokens.load().is_some());

    SkillSwapApi::logout(&api).await.unwrap();
    assert!(tokens.load().is_none());
}

#[tokio::test]
async fn browse_and_skills_directory_offline() {
    let (api, _) = offline();

    let users = SkillSwapApi::search_users(&api, UserSearchParams::with_skill("photo"))
        .await
        .unwrap();
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    // Photoshop, Photography offered, Photography wanted
    assert_eq!(ids, vec!["2", "3", "4"]);

    // Every seeded skill is offered once, so first-seen order decides
    let popular = SkillSwapApi::popular_skills(&api).await.unwrap();
    assert_eq!(popular.len(), 10);
    assert_eq!(popular[0].skill, "JavaScript");
    assert_eq!(popular[0].count, 1);
    assert!(popular.iter().all(|p| p.skill != "Nutrition"));

    let categories = SkillSwapApi::skill_categories(&api).await.unwrap();
    assert_eq!(categories.len(), 4);

    let health = SkillSwapApi::health(&api).await;
    assert!(health.is_demo());
}

#[tokio::test]
async fn swap_lifecycle_offline() {
    let (api, _) = offline();
    api.login(&demo_credentials()).await.into_result().unwrap();
    let me = UserRef::new(DEMO_USER_ID, "demo");

    let created = SkillSwapApi::create_swap(
        &api,
        &me,
        CreateSwapRequest {
            recipient: "2".to_string(),
            requested_skill: "Figma".to_string(),
            offered_skill: "General Help".to_string(),
            message: String::new(),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.status, SwapStatus::Pending);
    assert_eq!(created.recipient.display_name(), "Sarah Chen");

    // Requester may not accept their own request; refused before sending
    assert!(matches!(
        SkillSwapApi::update_swap_status(&api, &created, DEMO_USER_ID, SwapStatus::Accepted).await,
        Err(ClientError::Authorization(_))
    ));

    // Requester withdraws it while pending
    SkillSwapApi::delete_swap(&api, &created, DEMO_USER_ID)
        .await
        .unwrap();
    let listed = SkillSwapApi::list_swaps(&api, DEMO_USER_ID).await.unwrap();
    let withdrawn = listed.iter().find(|s| s.id == created.id).unwrap();
    assert_eq!(withdrawn.status, SwapStatus::Cancelled);

    // Terminal now: nothing moves it
    assert!(matches!(
        SkillSwapApi::update_swap_status(&api, withdrawn, DEMO_USER_ID, SwapStatus::Cancelled)
            .await,
        Err(ClientError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn seeded_request_can_be_accepted_completed_and_rated() {
    let (api, _) = offline();
    let swaps = SkillSwapApi::list_swaps(&api, DEMO_USER_ID).await.unwrap();
    let pending = swaps
        .iter()
        .find(|s| s.status == SwapStatus::Pending)
        .unwrap()
        .clone();

    let accepted =
        SkillSwapApi::update_swap_status(&api, &pending, DEMO_USER_ID, SwapStatus::Accepted)
            .await
            .unwrap();
    let completed = SkillSwapApi::update_swap_status(
        &api,
        &accepted,
        &pending.requester.id,
        SwapStatus::Completed,
    )
    .await
    .unwrap();

    let rating = SkillSwapApi::rate_swap(&api, &completed, DEMO_USER_ID, 5, "Lovely designs")
        .await
        .unwrap();
    assert_eq!(rating.rated_user.id, pending.requester.id);

    assert!(matches!(
        SkillSwapApi::rate_swap(&api, &completed, DEMO_USER_ID, 4, "").await,
        Err(ClientError::Validation(_))
    ));
}
