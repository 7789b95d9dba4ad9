//! Members and their social profiles.

use pulse_types::{
    ClientError, Member, MemberCreate, MemberQuery, MemberUpdate, SocialProfile,
    SocialProfileCreate, SocialProfileUpdate,
};

use crate::client::PulseClient;

impl PulseClient {
    /// `GET /v1/members/`.
    pub async fn members(&self, query: &MemberQuery) -> Result<Vec<Member>, ClientError> {
        self.get_query("/v1/members/", query).await
    }

    /// `GET /v1/members/{id}`, including social profiles.
    pub async fn member(&self, id: i64) -> Result<Member, ClientError> {
        self.get(&format!("/v1/members/{id}")).await
    }

    /// `POST /v1/members/`. Validated locally first.
    pub async fn create_member(&self, member: &MemberCreate) -> Result<Member, ClientError> {
        member.validate()?;
        self.post("/v1/members/", member).await
    }

    /// `PUT /v1/members/{id}`. Validated locally first.
    pub async fn update_member(&self, id: i64, update: &MemberUpdate) -> Result<Member, ClientError> {
        update.validate()?;
        self.put(&format!("/v1/members/{id}"), update).await
    }

    /// `DELETE /v1/members/{id}`. The backend answers `204` with no body.
    pub async fn delete_member(&self, id: i64) -> Result<(), ClientError> {
        self.delete_no_content(&format!("/v1/members/{id}")).await
    }

    /// `GET /v1/members/{id}/social-profiles`.
    pub async fn social_profiles(&self, member_id: i64) -> Result<Vec<SocialProfile>, ClientError> {
        self.get(&format!("/v1/members/{member_id}/social-profiles")).await
    }

    /// `POST /v1/members/{id}/social-profiles`.
    pub async fn add_social_profile(
        &self,
        member_id: i64,
        profile: &SocialProfileCreate,
    ) -> Result<SocialProfile, ClientError> {
        profile.validate()?;
        self.post(&format!("/v1/members/{member_id}/social-profiles"), profile)
            .await
    }

    /// `PUT /v1/members/{id}/social-profiles/{profile_id}`.
    pub async fn update_social_profile(
        &self,
        member_id: i64,
        profile_id: i64,
        update: &SocialProfileUpdate,
    ) -> Result<SocialProfile, ClientError> {
        update.validate()?;
        self.put(
            &format!("/v1/members/{member_id}/social-profiles/{profile_id}"),
            update,
        )
        .await
    }

    /// `DELETE /v1/members/{id}/social-profiles/{profile_id}`. Answers `204`.
    pub async fn delete_social_profile(
        &self,
        member_id: i64,
        profile_id: i64,
    ) -> Result<(), ClientError> {
        self.delete_no_content(&format!("/v1/members/{member_id}/social-profiles/{profile_id}"))
            .await
    }
}
