//! Backend-to-UI events.

use client_core::{GenerationTicket, MapError};
use shared::domain::GeneratedMap;

use crate::media::PreviewImage;

pub enum UiEvent {
    Info(String),
    BackendUnavailable(String),
    GenerationFinished {
        ticket: GenerationTicket,
        outcome: Result<GeneratedMap, MapError>,
        preview: Option<PreviewImage>,
    },
}
