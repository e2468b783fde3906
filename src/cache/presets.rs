//! Cache Presets
//!
//! The blog's cached read endpoints and the invalidation families that
//! writes must clear.

use crate::cache::CachePolicy;

// == Key Prefixes ==
pub const POSTS_LIST: &str = "posts:list";
pub const POSTS_DETAIL: &str = "posts:detail";
pub const USERS_PROFILE: &str = "users:profile";
pub const CATEGORIES_ALL: &str = "categories:all";
pub const CATEGORIES_LIST: &str = "categories:list";
pub const CATEGORIES_DETAIL: &str = "categories:detail";
pub const TAGS_ALL: &str = "tags:all";
pub const TAGS_LIST: &str = "tags:list";
pub const TAGS_CLOUD: &str = "tags:cloud";
pub const TAGS_DETAIL: &str = "tags:detail";
pub const SIDEBAR_DATA: &str = "sidebar:data";

// == Invalidation Families ==
pub const POSTS_FAMILY: &str = "posts:*";
pub const CATEGORIES_FAMILY: &str = "categories:*";
pub const TAGS_FAMILY: &str = "tags:*";
pub const USERS_FAMILY: &str = "users:*";
pub const SIDEBAR_FAMILY: &str = "sidebar:*";

/// Patterns to clear after a post is created, updated or deleted.
pub const ON_POST_WRITE: &[&str] = &[POSTS_FAMILY, SIDEBAR_FAMILY];

/// Patterns to clear after a category changes; post listings embed categories.
pub const ON_CATEGORY_WRITE: &[&str] = &[CATEGORIES_FAMILY, POSTS_FAMILY];

/// Patterns to clear after a tag changes; post listings embed tags.
pub const ON_TAG_WRITE: &[&str] = &[TAGS_FAMILY, POSTS_FAMILY];

/// Patterns to clear after a user profile changes.
pub const ON_USER_WRITE: &[&str] = &[USERS_FAMILY];

// == Policies ==
pub fn post_list<A>() -> CachePolicy<A> {
    CachePolicy::new(POSTS_LIST).ttl(300)
}

pub fn post_detail<A>() -> CachePolicy<A> {
    CachePolicy::new(POSTS_DETAIL).ttl(600)
}

pub fn user_profile<A>() -> CachePolicy<A> {
    CachePolicy::new(USERS_PROFILE).ttl(1800)
}

pub fn categories<A>() -> CachePolicy<A> {
    CachePolicy::new(CATEGORIES_ALL).ttl(3600)
}

pub fn category_list<A>() -> CachePolicy<A> {
    CachePolicy::new(CATEGORIES_LIST).ttl(3600)
}

pub fn category_detail<A>() -> CachePolicy<A> {
    CachePolicy::new(CATEGORIES_DETAIL).ttl(1800)
}

pub fn tags<A>() -> CachePolicy<A> {
    CachePolicy::new(TAGS_ALL).ttl(3600)
}

pub fn tag_list<A>() -> CachePolicy<A> {
    CachePolicy::new(TAGS_LIST).ttl(3600)
}

pub fn tag_cloud<A>() -> CachePolicy<A> {
    CachePolicy::new(TAGS_CLOUD).ttl(1800)
}

pub fn tag_detail<A>() -> CachePolicy<A> {
    CachePolicy::new(TAGS_DETAIL).ttl(1800)
}

pub fn sidebar<A>() -> CachePolicy<A> {
    CachePolicy::new(SIDEBAR_DATA).ttl(1800)
}
