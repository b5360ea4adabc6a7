//! # Skills Directory Endpoints

use shared::{
    PopularSkill, PopularSkillsResponse, SkillCategoriesResponse, SkillCategory, User,
    UserListEnvelope, UserSearchParams,
};

use super::client::{ApiClient, Served};

impl ApiClient {
    /// `GET /skills/available`: users open to swaps.
    #[tracing::instrument(skip(self))]
    pub async fn available_skills(&self, params: &UserSearchParams) -> Served<Vec<User>> {
        let live = self
            .fetch::<UserListEnvelope>(
                self.authorized(self.client.get(self.url("/skills/available")))
                    .query(&params.to_query()),
            )
            .await
            .map(UserListEnvelope::into_users);
        self.serve("available_skills", live, || self.mock.available_skills(params))
            .await
    }

    /// `GET /skills/popular`
    pub async fn popular_skills(&self) -> Served<Vec<PopularSkill>> {
        let live = self
            .fetch::<PopularSkillsResponse>(self.client.get(self.url("/skills/popular")))
            .await
            .map(|r| r.popular_skills);
        self.serve("popular_skills", live, || self.mock.popular_skills())
            .await
    }

    /// `GET /skills/categories`
    pub async fn skill_categories(&self) -> Served<Vec<SkillCategory>> {
        let live = self
            .fetch::<SkillCategoriesResponse>(self.client.get(self.url("/skills/categories")))
            .await
            .map(|r| r.categories);
        self.serve("skill_categories", live, || self.mock.skill_categories())
            .await
    }
}
