use crate::browse_error;
use crate::internal::user_interface::StringColor;

pub trait UserNotifier {
    fn report_error(&self, title: &str, message: &str, debug_detail: Option<&str>);
}

/// Reports errors on stderr.
#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier {
    verbose: bool,
}

impl TerminalNotifier {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl UserNotifier for TerminalNotifier {
    fn report_error(&self, title: &str, message: &str, debug_detail: Option<&str>) {
        browse_error!(format!("{}: {}", title.bold(), message));
        if self.verbose {
            if let Some(detail) = debug_detail {
                eprintln!("  {}", detail.light_black());
            }
        }
    }
}
