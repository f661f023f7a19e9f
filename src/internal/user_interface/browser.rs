use std::process::Stdio;

use crate::browse_error;
use crate::browse_info;
use crate::internal::user_interface::StringColor;

pub trait BrowserLauncher {
    fn open(&self, url: &str);
}

/// Opens URLs with the configured command, or the system's default browser.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    command: Option<Vec<String>>,
}

impl SystemBrowser {
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self {
            command: command.filter(|argv| !argv.is_empty()),
        }
    }

    fn spawn(argv: &[String], url: &str) -> std::io::Result<()> {
        std::process::Command::new(&argv[0])
            .args(&argv[1..])
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) {
        log::debug!("opening {url}");
        let result = match &self.command {
            Some(argv) => Self::spawn(argv, url),
            None => webbrowser::open(url),
        };

        match result {
            Ok(()) => browse_info!(format!("opened {}", url.light_blue())),
            Err(err) => {
                browse_error!(format!("failed to launch browser: {err}"));
                println!("{url}");
            }
        }
    }
}

/// Writes the URL on stdout instead of opening it.
#[derive(Debug, Clone, Default)]
pub struct PrintUrl;

impl BrowserLauncher for PrintUrl {
    fn open(&self, url: &str) {
        println!("{url}");
    }
}
