use std::io::IsTerminal;

use crate::browse_warning;
use crate::internal::git::RemoteDescriptor;
use crate::internal::user_interface::StringColor;

pub trait RemoteChooser {
    /// `None` when the user walked away from the choice.
    fn choose(&self, candidates: &[RemoteDescriptor]) -> Option<RemoteDescriptor>;
}

/// Asks which remote to use with an interactive list.
#[derive(Debug, Clone, Default)]
pub struct PromptChooser;

impl PromptChooser {
    pub fn new() -> Self {
        Self
    }
}

impl RemoteChooser for PromptChooser {
    fn choose(&self, candidates: &[RemoteDescriptor]) -> Option<RemoteDescriptor> {
        if !std::io::stdin().is_terminal() {
            browse_warning!(format!(
                "several remotes are configured; pick one with {}",
                "--remote".light_cyan()
            ));
            return None;
        }

        let choices: Vec<String> = candidates
            .iter()
            .map(|remote| {
                format!(
                    "{} {}",
                    remote.name,
                    remote.first_url().unwrap_or_default().light_black()
                )
            })
            .collect();

        let question = requestty::Question::select("select_remote")
            .ask_if_answered(true)
            .on_esc(requestty::OnEsc::Terminate)
            .message("Select remote")
            .choices(choices)
            .build();

        match requestty::prompt_one(question) {
            Ok(requestty::Answer::ListItem(item)) => candidates.get(item.index).cloned(),
            Ok(_) => None,
            Err(err) => {
                log::debug!("remote selection abandoned: {err:?}");
                None
            }
        }
    }
}
