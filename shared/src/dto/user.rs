//! # User Data Transfer Objects
//!
//! The marketplace user as it travels over the wire, plus the profile-update
//! and search shapes that operate on it.
//!
//! The canonical encoding is snake_case. Older clients sent camelCase names,
//! `_id` identifiers, a single `name` field and a nested `rating` object;
//! all of those are accepted on input and normalised into [`User`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{opt_string_or_int, string_or_int};

/// Role attached to an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

/// Aggregate rating of a user: running average and number of ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

impl RatingSummary {
    /// Fold one more 1-5 star rating into the running average.
    pub fn record(&mut self, stars: u8) {
        let total = self.average * f64::from(self.count) + f64::from(stars);
        self.count += 1;
        self.average = total / f64::from(self.count);
    }
}

/// A marketplace user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserWire")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub location: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    /// Average rating, 0.0 when unrated.
    pub rating: f64,
    pub rating_count: u32,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Name to show in listings.
    ///
    /// First and last name when present, otherwise the username, otherwise
    /// the local part of the email address.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        if !self.username.is_empty() {
            return self.username.clone();
        }
        self.email.split('@').next().unwrap_or_default().to_string()
    }

    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary {
            average: self.rating,
            count: self.rating_count,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Case-insensitive substring match against offered and wanted skills.
    pub fn has_skill_like(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.skills_offered
            .iter()
            .chain(self.skills_wanted.iter())
            .any(|skill| skill.to_lowercase().contains(&needle))
    }

    /// Apply a partial profile update in place.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(v) = &update.first_name {
            self.first_name = v.clone();
        }
        if let Some(v) = &update.last_name {
            self.last_name = v.clone();
        }
        if let Some(v) = &update.location {
            self.location = v.clone();
        }
        if let Some(v) = &update.bio {
            self.bio = v.clone();
        }
        if let Some(v) = &update.skills_offered {
            self.skills_offered = v.clone();
        }
        if let Some(v) = &update.skills_wanted {
            self.skills_wanted = v.clone();
        }
        if let Some(v) = update.is_available {
            self.is_available = v;
        }
        if let Some(v) = &update.profile_photo {
            self.profile_photo = Some(v.clone());
        }
    }
}

/// Rating as found on the wire: a number, a decimal string, or `{average, count}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RatingWire {
    Number(f64),
    Decimal(String),
    Nested {
        #[serde(default)]
        average: f64,
        #[serde(default)]
        count: u32,
    },
}

/// Input-side view of a user accepting every historical field spelling.
#[derive(Deserialize)]
struct UserWire {
    #[serde(alias = "_id", deserialize_with = "string_or_int")]
    id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default, alias = "firstName")]
    first_name: String,
    #[serde(default, alias = "lastName")]
    last_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<UserRole>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default, alias = "profilePhoto")]
    profile_photo: Option<String>,
    #[serde(default)]
    rating: Option<RatingWire>,
    #[serde(default, alias = "ratingCount")]
    rating_count: Option<u32>,
    #[serde(default, alias = "skillsOffered")]
    skills_offered: Vec<String>,
    #[serde(default, alias = "skillsWanted")]
    skills_wanted: Vec<String>,
    #[serde(default, alias = "isAvailable")]
    is_available: Option<bool>,
    #[serde(default, alias = "createdAt")]
    created_at: Option<DateTime<Utc>>,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        let (rating, nested_count) = match wire.rating {
            Some(RatingWire::Number(avg)) => (avg, None),
            Some(RatingWire::Decimal(text)) => (text.trim().parse().unwrap_or(0.0), None),
            Some(RatingWire::Nested { average, count }) => (average, Some(count)),
            None => (0.0, None),
        };

        let mut first_name = wire.first_name;
        let mut last_name = wire.last_name;
        if first_name.is_empty() && last_name.is_empty() {
            if let Some(name) = wire.name {
                let mut parts = name.trim().splitn(2, ' ');
                first_name = parts.next().unwrap_or_default().to_string();
                last_name = parts.next().unwrap_or_default().trim().to_string();
            }
        }

        Self {
            id: wire.id,
            username: wire.username,
            email: wire.email,
            first_name,
            last_name,
            role: wire.role.unwrap_or_default(),
            location: wire.location.unwrap_or_default(),
            bio: wire.bio.unwrap_or_default(),
            profile_photo: wire.profile_photo,
            rating,
            rating_count: wire.rating_count.or(nested_count).unwrap_or(0),
            skills_offered: wire.skills_offered,
            skills_wanted: wire.skills_wanted,
            is_available: wire.is_available.unwrap_or(true),
            created_at: wire.created_at,
        }
    }
}

/// Partial profile update (`PUT /users/profile`). Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_offered: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_wanted: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Envelope for endpoints that answer with a single user.
///
/// The backend returns the user bare; older clients wrapped it as `{user}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl UserEnvelope {
    pub fn into_user(self) -> User {
        match self {
            UserEnvelope::Wrapped { user } | UserEnvelope::Bare(user) => user,
        }
    }
}

/// Search and filter parameters for user listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchParams {
    /// Substring of first name, last name or email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Substring of an offered or wanted skill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl UserSearchParams {
    pub fn with_skill(skill: impl Into<String>) -> Self {
        Self {
            skill: Some(skill.into()),
            ..Self::default()
        }
    }

    /// Query-string pairs for the set filters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.search {
            pairs.push(("search", v.clone()));
        }
        if let Some(v) = &self.skill {
            pairs.push(("skill", v.clone()));
        }
        if let Some(v) = &self.location {
            pairs.push(("location", v.clone()));
        }
        if let Some(v) = self.available {
            pairs.push(("available", v.to_string()));
        }
        pairs
    }

    /// Whether `user` passes every set filter.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(skill) = &self.skill {
            if !user.has_skill_like(skill) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let search = search.to_lowercase();
            let hit = user.first_name.to_lowercase().contains(&search)
                || user.last_name.to_lowercase().contains(&search)
                || user.email.to_lowercase().contains(&search);
            if !hit {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !user.location.to_lowercase().contains(&location.to_lowercase()) {
                return false;
            }
        }
        if let Some(available) = self.available {
            if user.is_available != available {
                return false;
            }
        }
        true
    }
}

/// Envelope for user listings: a bare array or `{users: [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserListEnvelope {
    Wrapped { users: Vec<User> },
    Bare(Vec<User>),
}

impl UserListEnvelope {
    pub fn into_users(self) -> Vec<User> {
        match self {
            UserListEnvelope::Wrapped { users } | UserListEnvelope::Bare(users) => users,
        }
    }
}

/// Lightweight reference to a user embedded in other records.
///
/// The backend nests a full user; the legacy shape is `{_id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(alias = "_id", deserialize_with = "string_or_int")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, alias = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            first_name: None,
            last_name: None,
            name: Some(name.into()),
        }
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.username.clone().unwrap_or_else(|| self.id.clone())
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self::new(user.id.clone(), user.display_name())
    }
}

/// Accepts `recipient` either as a bare id or as a nested user reference.
pub(crate) fn user_ref_or_id<'de, D>(deserializer: D) -> Result<UserRef, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Either {
        Nested(UserRef),
        #[serde(deserialize_with = "opt_string_or_int")]
        Id(Option<String>),
    }

    match Either::deserialize(deserializer)? {
        Either::Nested(r) => Ok(r),
        Either::Id(Some(id)) => Ok(UserRef::new(id.clone(), id)),
        Either::Id(None) => Err(serde::de::Error::custom("missing user reference")),
    }
}
