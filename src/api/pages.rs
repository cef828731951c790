//! Page routes. Each returns the view model a client needs to render the
//! page; no HTML is produced here.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::dramas::{DramaListQuery, load_drama_detail};
use super::{ApiError, ApiResponse, AppState, DramaDetailDto, DramaDto, DramaPageDto};
use crate::config::ContactConfig;
use crate::models::Genre;
use crate::services::DashboardCounts;

#[derive(Debug, Serialize)]
pub struct ContactLink {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub heading: &'static str,
    pub tagline: &'static str,
    pub links: Vec<ContactLink>,
    pub trending: Vec<DramaDto>,
    pub genres: Vec<Genre>,
    pub grid: DramaPageDto,
}

#[derive(Debug, Serialize)]
pub struct ContactView {
    pub heading: &'static str,
    pub description: &'static str,
    pub links: Vec<ContactLink>,
}

#[derive(Debug, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub heading: &'static str,
    pub submit_to: &'static str,
    pub fields: Vec<FieldDescriptor>,
    pub alternate_label: &'static str,
    pub alternate_href: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AdminTab {
    pub key: &'static str,
    pub label: &'static str,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct AdminView {
    pub user: String,
    pub tabs: Vec<AdminTab>,
}

#[derive(Clone, Copy)]
enum Channel {
    Instagram,
    WhatsApp,
    Twitter,
    Telegram,
}

fn contact_links(contact: &ContactConfig, channels: &[Channel]) -> Vec<ContactLink> {
    channels
        .iter()
        .filter_map(|channel| {
            let (label, url) = match channel {
                Channel::Instagram => ("Instagram", &contact.instagram),
                Channel::WhatsApp => ("WhatsApp", &contact.whatsapp),
                Channel::Twitter => ("X / Twitter", &contact.twitter),
                Channel::Telegram => ("Telegram", &contact.telegram),
            };
            url.clone().map(|url| ContactLink { label, url })
        })
        .collect()
}

fn credential_fields(password_hint: Option<String>) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor {
            name: "email",
            label: "Email",
            kind: "email",
            required: true,
            hint: None,
        },
        FieldDescriptor {
            name: "password",
            label: "Password",
            kind: "password",
            required: true,
            hint: password_hint,
        },
    ]
}

/// GET /
pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DramaListQuery>,
) -> Result<Json<ApiResponse<HomeView>>, ApiError> {
    let contact = state.config().read().await.contact.clone();
    let query = params.into_query()?;
    let catalog = state.catalog();

    let (trending, genres, page) = tokio::try_join!(
        catalog.trending_dramas(),
        catalog.list_genres(),
        catalog.search_dramas(&query)
    )?;

    Ok(Json(ApiResponse::success(HomeView {
        heading: "Discover Your Next Favorite Short Drama",
        tagline: "Bite-sized stories, streamed in parts.",
        links: contact_links(&contact, &[Channel::Instagram, Channel::WhatsApp]),
        trending: trending.into_iter().map(DramaDto::from).collect(),
        genres,
        grid: DramaPageDto::new(page, query.query),
    })))
}

/// GET /dramas/{id}
pub async fn drama(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DramaDetailDto>>, ApiError> {
    let detail = load_drama_detail(&state, &id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// GET /request
pub async fn request(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ContactView>> {
    let contact = state.config().read().await.contact.clone();
    Json(ApiResponse::success(ContactView {
        heading: "Request a Drama",
        description: "Can't find your favorite short drama? Let us know through social media and we will look into adding it.",
        links: contact_links(
            &contact,
            &[Channel::Instagram, Channel::Twitter, Channel::Telegram],
        ),
    }))
}

/// GET /collaboration
pub async fn collaboration(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ContactView>> {
    let contact = state.config().read().await.contact.clone();
    Json(ApiResponse::success(ContactView {
        heading: "Let's Collaborate",
        description: "Interested in working together on a short drama project? Reach out through social media to talk it over.",
        links: contact_links(
            &contact,
            &[
                Channel::Instagram,
                Channel::WhatsApp,
                Channel::Twitter,
                Channel::Telegram,
            ],
        ),
    }))
}

/// GET /login
pub async fn login() -> Json<ApiResponse<FormView>> {
    Json(ApiResponse::success(FormView {
        heading: "Admin Login",
        submit_to: "/api/auth/login",
        fields: credential_fields(None),
        alternate_label: "Create an account",
        alternate_href: "/signup",
    }))
}

/// GET /signup
pub async fn signup(State(state): State<Arc<AppState>>) -> Json<ApiResponse<FormView>> {
    let min = state.config().read().await.security.min_password_length;
    Json(ApiResponse::success(FormView {
        heading: "Create Admin Account",
        submit_to: "/api/auth/signup",
        fields: credential_fields(Some(format!("At least {min} characters"))),
        alternate_label: "Already have an account? Log in",
        alternate_href: "/login",
    }))
}

/// GET /admin
pub async fn admin(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<AdminView>>, ApiError> {
    let DashboardCounts {
        dramas,
        genres,
        parts,
    } = state.catalog().dashboard_counts().await?;

    Ok(Json(ApiResponse::success(AdminView {
        user,
        tabs: vec![
            AdminTab {
                key: "dramas",
                label: "Dramas",
                count: dramas,
            },
            AdminTab {
                key: "genres",
                label: "Genres",
                count: genres,
            },
            AdminTab {
                key: "parts",
                label: "Parts",
                count: parts,
            },
        ],
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_links_skip_unset_channels() {
        let contact = ContactConfig {
            instagram: Some("https://instagram.com/x".to_string()),
            whatsapp: None,
            twitter: Some("https://twitter.com/x".to_string()),
            telegram: None,
        };
        let links = contact_links(
            &contact,
            &[Channel::Instagram, Channel::WhatsApp, Channel::Twitter],
        );
        let labels: Vec<_> = links.iter().map(|l| l.label).collect();
        assert_eq!(labels, ["Instagram", "X / Twitter"]);
    }
}
