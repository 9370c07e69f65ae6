//! Backend commands queued from UI to backend worker.

use client_core::GenerationTicket;
use shared::domain::StyleDescriptor;

pub enum BackendCommand {
    Generate {
        ticket: GenerationTicket,
        city_name: String,
        style: &'static StyleDescriptor,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Generate { .. } => "generate",
        }
    }
}
