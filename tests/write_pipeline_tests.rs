//! Background write dispatch and the change notifications it publishes.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use cdrama::api::AppState;
use cdrama::config::Config;
use cdrama::domain::events::NotificationEvent;
use cdrama::domain::{Collection, DramaId, GenreId, WriteKind};
use cdrama::forms::{DramaFields, GenreFields};
use cdrama::services::{WriteError, WriteOp};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower::ServiceExt;

async fn spawn_state() -> Arc<AppState> {
    let db_path =
        std::env::temp_dir().join(format!("cdrama-write-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    cdrama::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state")
}

async fn next_event(rx: &mut broadcast::Receiver<NotificationEvent>) -> NotificationEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event bus closed")
}

fn drama_fields(title: &str) -> DramaFields {
    DramaFields {
        title: title.to_string(),
        poster_url: "https://img.example.com/p.jpg".to_string(),
        synopsis: Some(Some("Synopsis".to_string())),
        rating: Some(Some(7.0)),
        is_trending: Some(true),
        is_hot: Some(true),
        genre_ids: Some(vec![GenreId::new("g1")]),
    }
}

#[tokio::test]
async fn create_publishes_dispatch_then_change() {
    let state = spawn_state().await;
    let mut rx = state.event_bus().subscribe();

    let id = GenreId::generate();
    let handle = state.writes().dispatch(WriteOp::CreateGenre {
        id: id.clone(),
        fields: GenreFields {
            name: "Romance".to_string(),
        },
    });
    assert_eq!(handle.id(), id.as_str());
    handle.wait().await.expect("create should succeed");

    match next_event(&mut rx).await {
        NotificationEvent::WriteDispatched {
            collection,
            kind,
            title,
            ..
        } => {
            assert_eq!(collection, Collection::Genres);
            assert_eq!(kind, WriteKind::Create);
            assert_eq!(title, "Genre Created");
        }
        other => panic!("unexpected event: {other:?}"),
    }

    match next_event(&mut rx).await {
        NotificationEvent::CollectionChanged { collection, id: changed, .. } => {
            assert_eq!(collection, Collection::Genres);
            assert_eq!(changed, id.as_str());
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let genre = state.catalog().get_genre(&id).await.unwrap();
    assert_eq!(genre.name, "Romance");
}

#[tokio::test]
async fn update_of_missing_record_reports_error_event() {
    let state = spawn_state().await;
    let mut rx = state.event_bus().subscribe();

    let result = state
        .writes()
        .dispatch(WriteOp::UpdateDrama {
            id: DramaId::new("missing"),
            fields: drama_fields("Ghost"),
        })
        .wait()
        .await;
    assert!(matches!(result, Err(WriteError::NotFound { .. })));

    assert!(matches!(
        next_event(&mut rx).await,
        NotificationEvent::WriteDispatched { .. }
    ));
    match next_event(&mut rx).await {
        NotificationEvent::Error { message } => assert!(message.contains("missing")),
        other => panic!("unexpected event: {other:?}"),
    }

    assert_eq!(state.catalog().dashboard_counts().await.unwrap().dramas, 0);
}

#[tokio::test]
async fn update_keeps_omitted_optional_fields() {
    let state = spawn_state().await;
    let id = DramaId::generate();

    state
        .writes()
        .dispatch(WriteOp::CreateDrama {
            id: id.clone(),
            fields: drama_fields("First Light"),
        })
        .wait()
        .await
        .unwrap();

    let mut fields = drama_fields("First Light Returns");
    fields.synopsis = None;
    fields.rating = None;
    fields.is_trending = None;
    fields.is_hot = None;
    fields.genre_ids = None;
    state
        .writes()
        .dispatch(WriteOp::UpdateDrama {
            id: id.clone(),
            fields,
        })
        .wait()
        .await
        .unwrap();

    let drama = state.catalog().get_drama(&id).await.unwrap();
    assert_eq!(drama.title, "First Light Returns");
    assert_eq!(drama.synopsis.as_deref(), Some("Synopsis"));
    assert_eq!(drama.rating, Some(7.0));
    assert_eq!(drama.genre_ids, vec![GenreId::new("g1")]);
    assert!(drama.is_trending);
    assert!(drama.is_hot);
}

#[tokio::test]
async fn update_clears_nulled_fields_and_keeps_omitted_flags() {
    let state = spawn_state().await;
    let id = DramaId::generate();

    state
        .writes()
        .dispatch(WriteOp::CreateDrama {
            id: id.clone(),
            fields: drama_fields("Night Market"),
        })
        .wait()
        .await
        .unwrap();

    let mut fields = drama_fields("Night Market");
    fields.rating = Some(None);
    fields.synopsis = Some(None);
    fields.is_trending = None;
    fields.is_hot = Some(false);
    state
        .writes()
        .dispatch(WriteOp::UpdateDrama {
            id: id.clone(),
            fields,
        })
        .wait()
        .await
        .unwrap();

    let drama = state.catalog().get_drama(&id).await.unwrap();
    assert_eq!(drama.rating, None);
    assert_eq!(drama.synopsis, None);
    assert!(drama.is_trending);
    assert!(!drama.is_hot);
}

#[tokio::test]
async fn deleting_a_drama_keeps_its_parts() {
    use cdrama::domain::PartId;
    use cdrama::forms::PartFields;

    let state = spawn_state().await;
    let drama_id = DramaId::generate();

    state
        .writes()
        .dispatch(WriteOp::CreateDrama {
            id: drama_id.clone(),
            fields: drama_fields("Short Lived"),
        })
        .wait()
        .await
        .unwrap();
    state
        .writes()
        .dispatch(WriteOp::CreatePart {
            id: PartId::generate(),
            fields: PartFields {
                drama_id: drama_id.clone(),
                part_number: 1,
                title: "Part 1".to_string(),
                video_url: "https://cdn.example.com/1.mp4".to_string(),
                duration: "2 min".to_string(),
                description: "Start".to_string(),
            },
        })
        .wait()
        .await
        .unwrap();

    state
        .writes()
        .dispatch(WriteOp::DeleteDrama {
            id: drama_id.clone(),
        })
        .wait()
        .await
        .unwrap();

    assert!(state.catalog().get_drama(&drama_id).await.is_err());
    let groups = state.catalog().grouped_parts().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0].orphaned);
    assert_eq!(groups[0].parent_title, "Unknown Drama");
}

#[tokio::test]
async fn event_stream_is_served_as_sse() {
    let state = spawn_state().await;
    let app = cdrama::api::router(state).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        mime::TEXT_EVENT_STREAM.as_ref()
    );
}
