//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd`; on failure the command is handed back with `status` set.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), BackendCommand> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            *status = "UI command queue is full; please retry".to_string();
            Err(cmd)
        }
        Err(TrySendError::Disconnected(cmd)) => {
            *status = "Backend worker disconnected; restart the app".to_string();
            Err(cmd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::MapSession;
    use crossbeam_channel::bounded;
    use shared::catalog;

    fn generate_cmd(session: &mut MapSession) -> BackendCommand {
        let ticket = session
            .begin_generation("Quito", catalog::default_style())
            .expect("start");
        BackendCommand::Generate {
            ticket,
            city_name: "Quito".into(),
            style: catalog::default_style(),
        }
    }

    #[test]
    fn queues_command_when_backend_is_listening() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();
        let mut session = MapSession::new();

        assert!(dispatch_backend_command(&tx, generate_cmd(&mut session), &mut status).is_ok());
        assert!(status.is_empty());
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn hands_command_back_when_backend_is_gone() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        let mut session = MapSession::new();

        let returned = dispatch_backend_command(&tx, generate_cmd(&mut session), &mut status);
        assert!(matches!(returned, Err(BackendCommand::Generate { .. })));
        assert!(status.contains("disconnected"));
    }
}
