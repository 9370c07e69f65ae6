//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{config::Settings, GeminiClient, MapGenerator, MissingMapGenerator};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::commands::BackendCommand, controller::events::UiEvent, media::decode_preview,
};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let generator: Arc<dyn MapGenerator> = match GeminiClient::new(&settings) {
            Ok(client) => {
                tracing::info!(endpoint = %client.endpoint(), "generation client ready");
                Arc::new(client)
            }
            Err(err) => {
                tracing::error!("generation client unavailable: {err:#}");
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "Generation is unavailable: {err:#}"
                )));
                Arc::new(MissingMapGenerator)
            }
        };
        if settings.configured_api_key().is_none() {
            let _ = ui_tx.try_send(UiEvent::Info(
                "No API key configured; set GEMINI_API_KEY before generating.".to_string(),
            ));
        }

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Generate {
                        ticket,
                        city_name,
                        style,
                    } => {
                        let outcome = generator.request_map(&city_name, style).await;
                        let preview = outcome.as_ref().ok().and_then(|map| {
                            decode_preview(&map.image.bytes)
                                .map_err(|err| {
                                    tracing::warn!(
                                        map_id = %map.id,
                                        "map preview decode failed: {err:#}"
                                    )
                                })
                                .ok()
                        });
                        let finished = UiEvent::GenerationFinished {
                            ticket,
                            outcome,
                            preview,
                        };
                        if ui_tx.send(finished).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("backend command loop finished");
        });
    });
}
