//! Client-side search and filtering over already-fetched records.
//!
//! The backend paginates but does not search; the dashboard narrows the
//! fetched page locally.

use crate::records::{Activity, Member};

/// Free-text search plus exact-match filters over activities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFilter {
    /// Case-insensitive substring matched against title, content, platform
    /// and member name. Blank matches everything.
    pub query: String,
    /// Exact platform wire name.
    pub platform: Option<String>,
    /// Exact member id.
    pub member_id: Option<i64>,
    /// Exact activity type.
    pub activity_type: Option<String>,
}

impl ActivityFilter {
    /// Whether `activity` passes every configured criterion.
    #[must_use]
    pub fn matches(&self, activity: &Activity) -> bool {
        if self.platform.as_ref().is_some_and(|p| activity.platform != *p) {
            return false;
        }
        if self.member_id.is_some_and(|id| activity.member_id != id) {
            return false;
        }
        if self
            .activity_type
            .as_deref()
            .is_some_and(|kind| activity.activity_type.as_deref() != Some(kind))
        {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystacks = [
            activity.title.as_deref(),
            activity.content.as_deref(),
            Some(activity.platform.as_str()),
            activity.member.as_ref().map(|m| m.name.as_str()),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|h| h.to_lowercase().contains(&needle))
    }

    /// The matching activities, in input order.
    #[must_use]
    pub fn apply<'a>(&self, activities: &'a [Activity]) -> Vec<&'a Activity> {
        activities.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Free-text search over members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberFilter {
    /// Case-insensitive substring matched against name, e-mail, department
    /// and position. Blank matches everything.
    pub query: String,
    /// Hide deactivated members.
    pub active_only: bool,
}

impl MemberFilter {
    /// Whether `member` passes the filter.
    #[must_use]
    pub fn matches(&self, member: &Member) -> bool {
        if self.active_only && !member.is_active {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(member.name.as_str()),
            Some(member.email.as_str()),
            member.department.as_deref(),
            member.position.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|h| h.to_lowercase().contains(&needle))
    }

    /// The matching members, in input order.
    #[must_use]
    pub fn apply<'a>(&self, members: &'a [Member]) -> Vec<&'a Member> {
        members.iter().filter(|m| self.matches(m)).collect()
    }
}
