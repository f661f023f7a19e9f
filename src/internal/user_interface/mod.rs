pub(crate) mod browser;
pub(crate) use browser::BrowserLauncher;
pub(crate) use browser::PrintUrl;
pub(crate) use browser::SystemBrowser;

pub(crate) mod chooser;
pub(crate) use chooser::PromptChooser;
pub(crate) use chooser::RemoteChooser;

pub(crate) mod colors;
pub(crate) use colors::StringColor;

pub(crate) mod notifier;
pub(crate) use notifier::TerminalNotifier;
pub(crate) use notifier::UserNotifier;

pub(crate) mod print;
