//! # Demo Backend
//!
//! Canned, deterministic stand-in for the REST backend, used when the real
//! one cannot be reached. Every method returns the same shape as its live
//! counterpart after a short simulated delay.
//!
//! Swap requests live in a [`SwapLedger`], so the lifecycle rules hold in
//! demo mode exactly as they do against the backend.

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use shared::{
    AuthResponse, CreateSwapRequest, HealthResponse, LoginRequest, PopularSkill, ProfileUpdate,
    RegisterRequest, SkillCategory, SwapRating, SwapRequest, SwapStatus, User, UserRef,
    UserRole, UserSearchParams,
};

use crate::core::error::Result;
use crate::lifecycle::{NewSwap, SwapLedger};

/// Token issued for demo sessions.
pub const MOCK_TOKEN: &str = "mock-token";

/// Id of the user a demo session acts as.
pub const DEMO_USER_ID: &str = "current-user";

const POPULAR_LIMIT: usize = 10;

const DEMO_MESSAGE: &str = "Running in demo mode - backend not available";

/// Fixed timestamp base so the canned dataset is identical on every run.
const SEED_EPOCH: i64 = 1_704_067_200; // 2024-01-01T00:00:00Z

fn seed_time(offset_hours: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(SEED_EPOCH + offset_hours * 3600, 0).unwrap_or_default()
}

struct MockState {
    users: Vec<User>,
    ledger: SwapLedger,
    session_user: Option<User>,
}

pub struct MockBackend {
    latency: Duration,
    state: Mutex<MockState>,
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl MockBackend {
    pub fn new(latency: Duration) -> Self {
        let users = seed_users();
        let mut ledger = SwapLedger::new();
        for swap in seed_swaps(&users) {
            ledger.insert(swap);
        }

        Self {
            latency,
            state: Mutex::new(MockState {
                users,
                ledger,
                session_user: None,
            }),
        }
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn session_user_or_demo(state: &MockState) -> User {
        state.session_user.clone().unwrap_or_else(demo_user)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.pause().await;
        let local = request.email.split('@').next().unwrap_or_default();
        let user = User {
            username: local.to_string(),
            first_name: local.to_string(),
            last_name: String::new(),
            email: request.email.clone(),
            ..demo_user()
        };
        self.state.lock().session_user = Some(user.clone());
        Ok(AuthResponse {
            user,
            token: MOCK_TOKEN.to_string(),
            refresh: None,
        })
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.pause().await;
        let user = User {
            username: request.username.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            location: request.location.clone().unwrap_or_default(),
            ..demo_user()
        };
        self.state.lock().session_user = Some(user.clone());
        Ok(AuthResponse {
            user,
            token: MOCK_TOKEN.to_string(),
            refresh: None,
        })
    }

    pub async fn logout(&self) {
        self.state.lock().session_user = None;
    }

    /// `GET /auth/me`. The caller has already checked that a token is held.
    pub async fn current_user(&self) -> Result<User> {
        self.pause().await;
        let state = self.state.lock();
        Ok(Self::session_user_or_demo(&state))
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.pause().await;
        let mut state = self.state.lock();
        let mut user = Self::session_user_or_demo(&state);
        user.apply(update);
        state.session_user = Some(user.clone());
        Ok(user)
    }

    pub async fn search_users(&self, params: &UserSearchParams) -> Result<Vec<User>> {
        self.pause().await;
        let state = self.state.lock();
        let me = state.session_user.as_ref().map(|u| u.id.as_str()).unwrap_or(DEMO_USER_ID);
        Ok(state
            .users
            .iter()
            .filter(|u| u.id != me && params.matches(u))
            .cloned()
            .collect())
    }

    /// Users currently open to swaps.
    pub async fn available_skills(&self, params: &UserSearchParams) -> Result<Vec<User>> {
        let mut users = self.search_users(params).await?;
        users.retain(|u| u.is_available);
        Ok(users)
    }

    /// Offered-skill counts over available users, most offered first.
    /// Ties keep the order in which skills were first seen.
    pub async fn popular_skills(&self) -> Result<Vec<PopularSkill>> {
        self.pause().await;
        let state = self.state.lock();

        let mut counts: Vec<PopularSkill> = Vec::new();
        for skill in state
            .users
            .iter()
            .filter(|u| u.is_available)
            .flat_map(|u| u.skills_offered.iter())
        {
            match counts.iter_mut().find(|p| &p.skill == skill) {
                Some(entry) => entry.count += 1,
                None => counts.push(PopularSkill {
                    skill: skill.clone(),
                    count: 1,
                }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(POPULAR_LIMIT);
        Ok(counts)
    }

    pub async fn skill_categories(&self) -> Result<Vec<SkillCategory>> {
        self.pause().await;
        let category = |name: &str, skills: &[&str]| SkillCategory {
            name: name.to_string(),
            code: Some(name.to_lowercase()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        };
        Ok(vec![
            category("Technology", &["JavaScript", "Python", "React", "Node.js"]),
            category("Design", &["Photoshop", "Figma", "UI/UX Design"]),
            category("Creative", &["Photography", "Cooking", "Music"]),
            category("Languages", &["Spanish", "French", "English"]),
        ])
    }

    pub async fn create_swap(
        &self,
        requester: &UserRef,
        request: &CreateSwapRequest,
    ) -> Result<SwapRequest> {
        self.pause().await;
        let mut state = self.state.lock();
        let recipient = state
            .users
            .iter()
            .find(|u| u.id == request.recipient)
            .map(UserRef::from)
            .unwrap_or_else(|| UserRef::new(request.recipient.clone(), "Demo User"));

        state.ledger.create(
            NewSwap {
                requester: requester.clone(),
                recipient,
                requested_skill: request.requested_skill.clone(),
                offered_skill: request.offered_skill.clone(),
                message: request.message.clone(),
            },
            Utc::now(),
        )
    }

    pub async fn list_swaps(&self, actor_id: &str) -> Result<Vec<SwapRequest>> {
        self.pause().await;
        Ok(self.state.lock().ledger.list_for(actor_id))
    }

    /// Requests fetched live before the backend went away are adopted on first touch.
    fn adopt(state: &mut MockState, swap: &SwapRequest) {
        if state.ledger.get(&swap.id).is_none() {
            state.ledger.insert(swap.clone());
        }
    }

    pub async fn update_swap_status(
        &self,
        swap: &SwapRequest,
        actor_id: &str,
        status: SwapStatus,
    ) -> Result<SwapRequest> {
        self.pause().await;
        let mut state = self.state.lock();
        Self::adopt(&mut state, swap);
        state.ledger.update_status(&swap.id, actor_id, status, Utc::now())
    }

    pub async fn delete_swap(&self, swap: &SwapRequest, actor_id: &str) -> Result<SwapRequest> {
        self.pause().await;
        let mut state = self.state.lock();
        Self::adopt(&mut state, swap);
        state.ledger.delete(&swap.id, actor_id, Utc::now())
    }

    pub async fn rate_swap(
        &self,
        swap: &SwapRequest,
        actor_id: &str,
        stars: u8,
        comment: &str,
    ) -> Result<SwapRating> {
        self.pause().await;
        let mut state = self.state.lock();
        Self::adopt(&mut state, swap);
        let rating = state.ledger.rate(&swap.id, actor_id, stars, comment, Utc::now())?;

        if let Some(user) = state.users.iter_mut().find(|u| u.id == rating.rated_user.id) {
            let mut summary = user.rating_summary();
            summary.record(stars);
            user.rating = summary.average;
            user.rating_count = summary.count;
        }
        Ok(rating)
    }

    pub async fn health(&self) -> HealthResponse {
        HealthResponse {
            status: HealthResponse::DEMO.to_string(),
            message: DEMO_MESSAGE.to_string(),
        }
    }
}

/// The account a demo session acts as before any login details are known.
pub fn demo_user() -> User {
    User {
        id: DEMO_USER_ID.to_string(),
        username: "demo".to_string(),
        email: "demo@example.com".to_string(),
        first_name: "Demo".to_string(),
        last_name: "User".to_string(),
        role: UserRole::User,
        location: String::new(),
        bio: String::new(),
        profile_photo: None,
        rating: 0.0,
        rating_count: 0,
        skills_offered: vec!["General Help".to_string()],
        skills_wanted: Vec::new(),
        is_available: true,
        created_at: Some(seed_time(0)),
    }
}

fn seed_user(
    id: &str,
    first: &str,
    last: &str,
    location: &str,
    offered: &[&str],
    wanted: &[&str],
    rating: (f64, u32),
) -> User {
    let to_vec = |skills: &[&str]| skills.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    User {
        id: id.to_string(),
        username: first.to_lowercase(),
        email: format!("{}@example.com", first.to_lowercase()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        role: UserRole::User,
        location: location.to_string(),
        bio: String::new(),
        profile_photo: None,
        rating: rating.0,
        rating_count: rating.1,
        skills_offered: to_vec(offered),
        skills_wanted: to_vec(wanted),
        is_available: true,
        created_at: Some(seed_time(0)),
    }
}

fn seed_users() -> Vec<User> {
    vec![
        seed_user(
            "1",
            "Alex",
            "Johnson",
            "New York",
            &["JavaScript", "React", "Node.js"],
            &["Python", "Machine Learning"],
            (4.5, 12),
        ),
        seed_user(
            "2",
            "Sarah",
            "Chen",
            "San Francisco",
            &["UI/UX Design", "Photoshop", "Figma"],
            &["JavaScript", "React"],
            (4.8, 8),
        ),
        seed_user(
            "3",
            "Mike",
            "Rodriguez",
            "Los Angeles",
            &["Spanish", "Cooking", "Photography"],
            &["Excel", "Data Analysis"],
            (4.2, 15),
        ),
        seed_user(
            "4",
            "Emma",
            "Wilson",
            "Chicago",
            &["Yoga", "Meditation", "Nutrition"],
            &["Photography", "Video Editing"],
            (4.7, 6),
        ),
    ]
}

fn seed_swaps(users: &[User]) -> Vec<SwapRequest> {
    let me = UserRef::from(&demo_user());
    let by_id = |id: &str| {
        users
            .iter()
            .find(|u| u.id == id)
            .map(UserRef::from)
            .unwrap_or_else(|| UserRef::new(id, id))
    };

    vec![
        SwapRequest {
            id: "demo-1".to_string(),
            requester: by_id("2"),
            recipient: me.clone(),
            requested_skill: "General Help".to_string(),
            offered_skill: "UI/UX Design".to_string(),
            message: "I'd like some general help from you. I can offer UI/UX Design in return."
                .to_string(),
            status: SwapStatus::Pending,
            created_at: seed_time(24),
            updated_at: None,
        },
        SwapRequest {
            id: "demo-2".to_string(),
            requester: by_id("3"),
            recipient: me,
            requested_skill: "General Help".to_string(),
            offered_skill: "Spanish".to_string(),
            message: "Happy to trade Spanish lessons.".to_string(),
            status: SwapStatus::Accepted,
            created_at: seed_time(0),
            updated_at: Some(seed_time(2)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> MockBackend {
        MockBackend::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_login_derives_user_from_email() {
        let mock = backend();
        let auth = mock
            .login(&LoginRequest {
                email: "demo@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(auth.token, MOCK_TOKEN);
        assert_eq!(auth.user.id, DEMO_USER_ID);
        assert_eq!(auth.user.email, "demo@example.com");
        assert_eq!(auth.user.display_name(), "demo");
    }

    #[tokio::test]
    async fn test_current_user_defaults_to_demo_user() {
        let mock = backend();
        assert_eq!(mock.current_user().await.unwrap().email, "demo@example.com");
        mock.register(&RegisterRequest {
            username: "bella".to_string(),
            email: "bella@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(mock.current_user().await.unwrap().username, "bella");
    }

    #[tokio::test]
    async fn test_popular_skills_counted_from_available_users() {
        let mock = backend();
        let popular = mock.popular_skills().await.unwrap();
        assert_eq!(popular.len(), 10);
        assert_eq!(popular[0].skill, "JavaScript");
        assert!(popular.iter().all(|p| p.count == 1));

        {
            let mut state = mock.state.lock();
            state.users[1].skills_offered.push("React".to_string());
            state.users[2].is_available = false;
        }
        let popular = mock.popular_skills().await.unwrap();
        assert_eq!(popular[0].skill, "React");
        assert_eq!(popular[0].count, 2);
        assert!(popular.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(popular.iter().all(|p| p.skill != "Spanish"));
    }

    #[tokio::test]
    async fn test_search_by_skill() {
        let mock = backend();
        let users = mock
            .search_users(&UserSearchParams::with_skill("react"))
            .await
            .unwrap();
        let names: Vec<String> = users.iter().map(User::display_name).collect();
        assert_eq!(names, vec!["Alex Johnson", "Sarah Chen"]);
    }

    #[tokio::test]
    async fn test_search_is_deterministic() {
        let a = backend().search_users(&UserSearchParams::default()).await.unwrap();
        let b = backend().search_users(&UserSearchParams::default()).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[tokio::test]
    async fn test_seeded_swaps_belong_to_demo_user() {
        let mock = backend();
        let swaps = mock.list_swaps(DEMO_USER_ID).await.unwrap();
        assert_eq!(swaps.len(), 2);
        assert_eq!(swaps[0].status, SwapStatus::Pending);
        assert_eq!(swaps[1].status, SwapStatus::Accepted);
    }

    #[tokio::test]
    async fn test_demo_user_accepts_seeded_request() {
        let mock = backend();
        let pending = mock.list_swaps(DEMO_USER_ID).await.unwrap().remove(0);
        let accepted = mock
            .update_swap_status(&pending, DEMO_USER_ID, SwapStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(accepted.status, SwapStatus::Accepted);
    }

    #[tokio::test]
    async fn test_rating_updates_rated_users_average() {
        let mock = backend();
        let accepted = mock.list_swaps(DEMO_USER_ID).await.unwrap().remove(1);
        let completed = mock
            .update_swap_status(&accepted, DEMO_USER_ID, SwapStatus::Completed)
            .await
            .unwrap();
        mock.rate_swap(&completed, DEMO_USER_ID, 5, "Muy bien").await.unwrap();

        let mike = mock
            .search_users(&UserSearchParams::with_skill("spanish"))
            .await
            .unwrap()
            .remove(0);
        assert_eq!(mike.rating_count, 16);
        assert!(mike.rating > 4.2);
    }

    #[tokio::test]
    async fn test_unknown_request_is_adopted() {
        let mock = backend();
        let foreign = SwapRequest {
            id: "live-77".to_string(),
            requester: UserRef::new("1", "Alex"),
            recipient: UserRef::new("2", "Bella"),
            requested_skill: "Python".to_string(),
            offered_skill: "JavaScript".to_string(),
            message: String::new(),
            status: SwapStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        };
        let accepted = mock
            .update_swap_status(&foreign, "2", SwapStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(accepted.id, "live-77");
        assert!(mock
            .update_swap_status(&foreign, "2", SwapStatus::Accepted)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_health_reports_demo() {
        assert!(backend().health().await.is_demo());
    }
}
