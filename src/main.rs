mod internal;

use std::process::exit;

use crate::internal::cli::CliAction;
use crate::internal::cli::CliArgs;
use crate::internal::cli::LOG_ENV;
use crate::internal::config::Config;
use crate::internal::coordinator::ActionOutcome;
use crate::internal::coordinator::Availability;
use crate::internal::coordinator::Collaborators;
use crate::internal::coordinator::RemoteSelectionCoordinator;
use crate::internal::coordinator::CANNOT_OPEN_IN_BROWSER;
use crate::internal::git::CliGitRunner;
use crate::internal::git::Git2RepositoryProvider;
use crate::internal::user_interface::BrowserLauncher;
use crate::internal::user_interface::PrintUrl;
use crate::internal::user_interface::PromptChooser;
use crate::internal::user_interface::SystemBrowser;
use crate::internal::user_interface::TerminalNotifier;
use crate::internal::user_interface::UserNotifier;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = match CliArgs::try_parse_from(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };

    init_logging(args.verbose);

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            browse_error!(err);
            exit(1);
        }
    };
    log::debug!("configuration: {config:?}");

    let repositories = Git2RepositoryProvider::new();
    let git = CliGitRunner::new(config.git_timeout);
    let chooser = PromptChooser::new();
    let notifier = TerminalNotifier::new(args.verbose);
    let launcher: Box<dyn BrowserLauncher> = if args.print {
        Box::new(PrintUrl)
    } else {
        Box::new(SystemBrowser::new(config.browser.clone()))
    };

    let coordinator = RemoteSelectionCoordinator::new(
        Collaborators {
            repositories: &repositories,
            vcs_state: &repositories,
            blame: &repositories,
            git: &git,
            chooser: &chooser,
            launcher: launcher.as_ref(),
            notifier: &notifier,
        },
        config.normalize_options(),
    )
    .with_remote_filter(args.remote.clone().or_else(|| config.remote.clone()));

    if let CliAction::Status { path } = &args.action {
        let availability = coordinator.availability(path);
        println!(
            "{}",
            match availability {
                Availability::Hidden => "hidden",
                Availability::Disabled => "disabled",
                Availability::Enabled => "enabled",
            }
        );
        exit(match availability {
            Availability::Enabled => 0,
            _ => 1,
        });
    }

    let target = match args.action.browse_target() {
        Ok(Some(target)) => target,
        Ok(None) => exit(0),
        Err(err) => {
            notifier.report_error(CANNOT_OPEN_IN_BROWSER, &err.to_string(), None);
            exit(1);
        }
    };

    match coordinator.run(&target) {
        ActionOutcome::Opened(_) | ActionOutcome::Abandoned => exit(0),
        ActionOutcome::Failed => exit(1),
    }
}
