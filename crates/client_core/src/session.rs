//! Per-run state: the current map, its history, the viewport and the
//! pending-generation flag.

use std::{sync::Arc, time::Instant};

use shared::{
    domain::{GeneratedMap, MapExport, MapId, StyleDescriptor},
    error::DisplayError,
};
use tracing::{debug, info, warn};

use crate::{
    error::MapError,
    history::History,
    loading::LoadingTicker,
    viewport::{Point, Viewport, BUTTON_ZOOM_STEP},
    MapGenerator,
};

/// Proof that a generation was started on a session. Consumed on completion.
#[derive(Debug, PartialEq, Eq)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct PendingGeneration {
    ticket_id: u64,
    city_name: String,
    style: &'static StyleDescriptor,
    started_at: Instant,
}

#[derive(Debug, Default)]
pub struct MapSession {
    current: Option<Arc<GeneratedMap>>,
    history: History,
    viewport: Viewport,
    pending: Option<PendingGeneration>,
    last_error: Option<DisplayError>,
    ticker: LoadingTicker,
    next_ticket: u64,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Arc<GeneratedMap>> {
        self.current.as_ref()
    }

    pub fn has_map(&self) -> bool {
        self.current.is_some()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_thumbnails(&self) -> impl Iterator<Item = &Arc<GeneratedMap>> {
        self.history.thumbnails()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<(&str, &'static StyleDescriptor)> {
        self.pending
            .as_ref()
            .map(|pending| (pending.city_name.as_str(), pending.style))
    }

    /// Rotating status text; `None` when nothing is in flight.
    pub fn loading_message(&self) -> Option<&'static str> {
        self.pending
            .as_ref()
            .map(|pending| self.ticker.message_at(pending.started_at.elapsed()))
    }

    pub fn last_error(&self) -> Option<&DisplayError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn begin_generation(
        &mut self,
        city_name: &str,
        style: &'static StyleDescriptor,
    ) -> Result<GenerationTicket, MapError> {
        if self.pending.is_some() {
            debug!(city = city_name, "generation already in flight; rejecting trigger");
            return Err(MapError::Busy);
        }

        let city = city_name.trim();
        if city.is_empty() {
            let err = MapError::Validation;
            self.last_error = Some(err.to_display());
            return Err(err);
        }

        self.last_error = None;
        self.viewport.reset();

        let ticket_id = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(PendingGeneration {
            ticket_id,
            city_name: city.to_string(),
            style,
            started_at: Instant::now(),
        });
        info!(city, style = style.id, ticket = ticket_id, "generation started");
        Ok(GenerationTicket(ticket_id))
    }

    /// Applies a generation outcome. On failure the current map and history
    /// are left as they were.
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<GeneratedMap, MapError>,
    ) -> Result<Arc<GeneratedMap>, MapError> {
        match self.pending.as_ref() {
            Some(pending) if pending.ticket_id == ticket.0 => {}
            _ => {
                warn!(
                    ticket = ticket.0,
                    "dropping result for a generation this session is not waiting on"
                );
                return Err(MapError::transport("unexpected generation result"));
            }
        }
        self.pending = None;

        match outcome {
            Ok(map) => {
                let map = Arc::new(map);
                info!(
                    city = %map.city_name,
                    style = map.style.id,
                    map_id = %map.id,
                    "map generated"
                );
                self.history.push(Arc::clone(&map));
                self.current = Some(Arc::clone(&map));
                self.viewport.reset();
                Ok(map)
            }
            Err(err) => {
                warn!(ticket = ticket.0, "generation failed: {err}");
                self.last_error = Some(err.to_display());
                Err(err)
            }
        }
    }

    pub async fn generate<G>(
        &mut self,
        generator: &G,
        city_name: &str,
        style: &'static StyleDescriptor,
    ) -> Result<Arc<GeneratedMap>, MapError>
    where
        G: MapGenerator + ?Sized,
    {
        let ticket = self.begin_generation(city_name, style)?;
        let city = city_name.trim().to_string();
        let outcome = generator.request_map(&city, style).await;
        self.complete_generation(ticket, outcome)
    }

    pub fn select_from_history(&mut self, id: MapId) -> Option<Arc<GeneratedMap>> {
        let map = Arc::clone(self.history.get(id)?);
        self.current = Some(Arc::clone(&map));
        self.viewport.reset();
        Some(map)
    }

    pub fn download(&self) -> Option<MapExport> {
        self.current.as_deref().map(MapExport::from)
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn zoom(&mut self, delta: f32) {
        if self.has_map() {
            self.viewport.zoom(delta);
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom(BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(-BUTTON_ZOOM_STEP);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if self.has_map() {
            self.viewport.wheel(delta_y);
        }
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        if self.has_map() {
            self.viewport.begin_drag(pointer);
        }
    }

    pub fn continue_drag(&mut self, pointer: Point) {
        if self.has_map() {
            self.viewport.continue_drag(pointer);
        }
    }

    pub fn end_drag(&mut self) {
        self.viewport.end_drag();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
