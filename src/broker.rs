mod adapters;
pub mod scripted;

pub use adapters::{
    NullSettingsLauncher, PermissionBroker, RequestId, RequestOutcome, SettingsLauncher,
};
pub use scripted::{
    AnswerEntry, PromptAnswer, RecordingSettingsLauncher, Script, ScriptedBroker, SeedEntry,
};
