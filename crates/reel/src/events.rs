use reel_core::protocol::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Command(ControlCommand),
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(command: ControlCommand) -> Self {
        match command {
            ControlCommand::Show => AppEvent::Show,
            ControlCommand::Hide => AppEvent::Hide,
            other => AppEvent::Command(other),
        }
    }
}
