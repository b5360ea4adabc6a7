//! # Skills Directory Data Transfer Objects
//!
//! Shapes for `/skills/popular`, `/skills/categories` and the `/health` probe.

use serde::{Deserialize, Serialize};

/// A skill and how many available users offer it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularSkill {
    pub skill: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularSkillsResponse {
    #[serde(alias = "popularSkills")]
    pub popular_skills: Vec<PopularSkill>,
}

/// Named group of skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategoriesResponse {
    pub categories: Vec<SkillCategory>,
}

/// `GET /health` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthResponse {
    /// Status string reported while serving canned data.
    pub const DEMO: &'static str = "DEMO";

    pub fn is_demo(&self) -> bool {
        self.status.eq_ignore_ascii_case(Self::DEMO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popular_skills_both_spellings() {
        let a: PopularSkillsResponse =
            serde_json::from_str(r#"{"popular_skills": [{"skill": "Rust", "count": 3}]}"#).unwrap();
        let b: PopularSkillsResponse =
            serde_json::from_str(r#"{"popularSkills": [{"skill": "Rust", "count": 3}]}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_health_demo_flag() {
        let live: HealthResponse =
            serde_json::from_str(r#"{"status": "healthy", "message": "Skill Swap API is running"}"#)
                .unwrap();
        assert!(!live.is_demo());
        let demo = HealthResponse {
            status: "demo".to_string(),
            message: String::new(),
        };
        assert!(demo.is_demo());
    }
}
