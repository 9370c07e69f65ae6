use super::*;

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use shared::{catalog, domain::MapImage, error::ErrorCode};

use crate::{
    error::BLANK_CITY_MESSAGE, history::HISTORY_CAPACITY, loading::INITIAL_LOADING_MESSAGE,
};

enum Scripted {
    Image,
    Fail(MapError),
}

struct ScriptedGenerator {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    fn always_ok() -> Self {
        Self::new(std::iter::empty())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MapGenerator for ScriptedGenerator {
    async fn request_map(
        &self,
        city_name: &str,
        style: &'static StyleDescriptor,
    ) -> Result<GeneratedMap, MapError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Scripted::Image);
        match next {
            Scripted::Image => Ok(GeneratedMap::new(
                city_name,
                style,
                MapImage::new("image/png", format!("png:{city_name}").into_bytes()),
            )),
            Scripted::Fail(err) => Err(err),
        }
    }
}

fn style(id: &str) -> &'static StyleDescriptor {
    catalog::find(id).expect("catalog style")
}

#[tokio::test]
async fn blank_city_fails_validation_without_remote_call() {
    let generator = ScriptedGenerator::always_ok();
    let mut session = MapSession::new();

    for city in ["", "   "] {
        let err = session
            .generate(&generator, city, catalog::default_style())
            .await
            .expect_err("blank city must fail");
        assert_eq!(err, MapError::Validation);
    }

    assert_eq!(generator.calls(), 0);
    assert!(!session.is_busy());
    let shown = session.last_error().expect("error recorded");
    assert_eq!(shown.code, ErrorCode::Validation);
    assert_eq!(shown.message, BLANK_CITY_MESSAGE);
}

#[tokio::test]
async fn success_sets_current_and_prepends_history() {
    let generator = ScriptedGenerator::always_ok();
    let mut session = MapSession::new();

    let tokyo = session
        .generate(&generator, " Tokyo ", style("cyberpunk"))
        .await
        .expect("tokyo");
    assert_eq!(tokyo.city_name, "Tokyo");
    assert_eq!(tokyo.style.id, "cyberpunk");

    session
        .generate(&generator, "Paris", style("watercolor"))
        .await
        .expect("paris");

    assert_eq!(session.current().map(|m| m.city_name.as_str()), Some("Paris"));
    let cities: Vec<_> = session.history().iter().map(|m| m.city_name.as_str()).collect();
    assert_eq!(cities, ["Paris", "Tokyo"]);
    assert!(session.last_error().is_none());
    assert!(session.loading_message().is_none());
}

#[tokio::test]
async fn failure_keeps_previous_map_and_history() {
    let generator = ScriptedGenerator::new([
        Scripted::Image,
        Scripted::Fail(MapError::transport("quota exceeded")),
    ]);
    let mut session = MapSession::new();

    let tokyo = session
        .generate(&generator, "Tokyo", style("pixel-art"))
        .await
        .expect("tokyo");
    let err = session
        .generate(&generator, "Paris", style("ink"))
        .await
        .expect_err("paris fails");

    assert_eq!(err.code(), ErrorCode::Transport);
    assert_eq!(session.current().map(|m| m.id), Some(tokyo.id));
    assert_eq!(session.history().len(), 1);
    assert!(!session.is_busy());
    assert_eq!(
        session.last_error().map(|e| e.message.as_str()),
        Some("quota exceeded")
    );
}

#[tokio::test]
async fn remote_empty_failures_are_reported_distinctly() {
    let generator = ScriptedGenerator::new([
        Scripted::Fail(MapError::NoCandidate { block_reason: None }),
        Scripted::Fail(MapError::NoImagePart),
    ]);
    let mut session = MapSession::new();

    let first = session
        .generate(&generator, "Lima", catalog::default_style())
        .await
        .expect_err("no candidate");
    let second = session
        .generate(&generator, "Lima", catalog::default_style())
        .await
        .expect_err("no image");

    assert_eq!(first.remote_empty_kind(), Some(crate::RemoteEmptyKind::NoCandidate));
    assert_eq!(second.remote_empty_kind(), Some(crate::RemoteEmptyKind::NoImagePart));
    assert!(session.current().is_none());
    assert_eq!(
        session.last_error().map(|e| e.message.as_str()),
        Some("AI failed to return an image.")
    );
}

#[tokio::test]
async fn history_holds_the_ten_most_recent_maps() {
    let generator = ScriptedGenerator::always_ok();
    let mut session = MapSession::new();
    let total = 14;

    for i in 1..=total {
        session
            .generate(&generator, &format!("city-{i}"), catalog::default_style())
            .await
            .expect("generate");
    }

    assert_eq!(session.history().len(), HISTORY_CAPACITY);
    let cities: Vec<_> = session.history().iter().map(|m| m.city_name.clone()).collect();
    let expected: Vec<_> = ((total - 9)..=total)
        .rev()
        .map(|i| format!("city-{i}"))
        .collect();
    assert_eq!(cities, expected);
    assert_eq!(
        session.history().iter().last().map(|m| m.city_name.clone()),
        Some(format!("city-{}", total - 9))
    );
}

#[test]
fn second_trigger_while_pending_is_rejected() {
    let mut session = MapSession::new();
    let ticket = session
        .begin_generation("Rome", catalog::default_style())
        .expect("first trigger");
    assert!(session.is_busy());
    assert_eq!(session.loading_message(), Some(INITIAL_LOADING_MESSAGE));
    assert_eq!(session.pending_request().map(|(city, _)| city), Some("Rome"));

    assert_eq!(
        session.begin_generation("Milan", catalog::default_style()),
        Err(MapError::Busy)
    );

    let map = GeneratedMap::new(
        "Rome",
        catalog::default_style(),
        MapImage::new("image/png", vec![1, 2, 3]),
    );
    session
        .complete_generation(ticket, Ok(map))
        .expect("complete");
    assert!(!session.is_busy());
}

#[test]
fn foreign_ticket_is_ignored() {
    let mut session = MapSession::new();
    let mut other = MapSession::new();
    let _ticket = session
        .begin_generation("Rome", catalog::default_style())
        .expect("start");
    // Both sessions hand out ticket 0 first; advance the other one.
    let first = other
        .begin_generation("Nice", catalog::default_style())
        .expect("other start");
    other
        .complete_generation(first, Err(MapError::NoImagePart))
        .expect_err("fails");
    let foreign = other
        .begin_generation("Nice", catalog::default_style())
        .expect("other second start");

    let map = GeneratedMap::new(
        "Nice",
        catalog::default_style(),
        MapImage::new("image/png", vec![9]),
    );
    assert!(session.complete_generation(foreign, Ok(map)).is_err());
    assert!(session.is_busy());
    assert!(session.current().is_none());
}

#[tokio::test]
async fn viewport_ops_are_noops_without_a_map() {
    let generator = ScriptedGenerator::always_ok();
    let mut session = MapSession::new();

    session.zoom_in();
    session.wheel(-100.0);
    session.begin_drag(Point::new(100.0, 50.0));
    session.continue_drag(Point::new(120.0, 60.0));
    assert_eq!(session.viewport().state(), crate::ViewportState::default());
    assert!(!session.viewport().is_dragging());

    session
        .generate(&generator, "Cairo", catalog::default_style())
        .await
        .expect("generate");
    session.begin_drag(Point::new(100.0, 50.0));
    session.continue_drag(Point::new(120.0, 60.0));
    session.end_drag();
    session.zoom_in();
    assert_eq!(session.viewport().offset(), Point::new(20.0, 10.0));
    assert!((session.viewport().scale() - 1.2).abs() < 1e-6);
}

#[tokio::test]
async fn new_generation_and_history_selection_reset_viewport() {
    let generator = ScriptedGenerator::always_ok();
    let mut session = MapSession::new();

    let first = session
        .generate(&generator, "Oslo", catalog::default_style())
        .await
        .expect("oslo");
    session.zoom(2.0);
    session.begin_drag(Point::new(0.0, 0.0));
    session.continue_drag(Point::new(30.0, 30.0));
    session.end_drag();

    session
        .generate(&generator, "Bergen", catalog::default_style())
        .await
        .expect("bergen");
    assert_eq!(session.viewport().state(), crate::ViewportState::default());

    session.zoom(1.0);
    let selected = session
        .select_from_history(first.id)
        .expect("oslo still in history");
    assert_eq!(selected.city_name, "Oslo");
    assert_eq!(session.current().map(|m| m.id), Some(first.id));
    assert_eq!(session.viewport().state(), crate::ViewportState::default());
    assert_eq!(session.history().len(), 2);
    assert!(session.select_from_history(MapId::new()).is_none());
}

#[tokio::test]
async fn download_exports_current_map() {
    let generator = ScriptedGenerator::always_ok();
    let mut session = MapSession::new();
    assert!(session.download().is_none());

    session
        .generate(&generator, "Buenos Aires", style("blueprint"))
        .await
        .expect("generate");
    let export = session.download().expect("export");
    assert_eq!(export.file_name, "MapMaker-Buenos Aires-blueprint.png");
    assert_eq!(export.mime_type, "image/png");
    assert_eq!(&*export.bytes, b"png:Buenos Aires");
    assert!(session.current().is_some());
}
