use super::*;

use tempfile::TempDir;

fn parse(args: &[&str]) -> CliArgs {
    let argv = std::iter::once("gitlab-browse").chain(args.iter().copied());
    CliArgs::try_parse_from(argv).expect("arguments should parse")
}

fn parse_err(args: &[&str]) -> clap::error::ErrorKind {
    let argv = std::iter::once("gitlab-browse").chain(args.iter().copied());
    CliArgs::try_parse_from(argv)
        .expect_err("arguments should be rejected")
        .kind()
}

mod parsing_tests {
    use super::*;

    #[test]
    fn test_file_with_lines() {
        let args = parse(&["file", "src/main.rs", "-L", "10-12"]);
        assert_eq!(
            args.action,
            CliAction::File {
                path: PathBuf::from("src/main.rs"),
                selection: Some(Selection::Lines(SelectionRange::new(10, 12))),
            }
        );
        assert!(!args.print);
        assert!(!args.verbose);
        assert_eq!(args.remote, None);
    }

    #[test]
    fn test_global_flags_after_the_subcommand() {
        let args = parse(&["file", "a.rs", "--print", "--remote", "upstream", "-v"]);
        assert!(args.print);
        assert!(args.verbose);
        assert_eq!(args.remote.as_deref(), Some("upstream"));
    }

    #[test]
    fn test_file_with_offsets() {
        let args = parse(&["--config", "/tmp/c.yaml", "file", "a.rs", "--offsets", "3:9"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.yaml")));
        assert_eq!(
            args.action,
            CliAction::File {
                path: PathBuf::from("a.rs"),
                selection: Some(Selection::Offsets { start: 3, end: 9 }),
            }
        );
    }

    #[test]
    fn test_commit_defaults_to_the_current_directory() {
        let args = parse(&["commit", "abc123"]);
        assert_eq!(
            args.action,
            CliAction::Commit {
                dir: PathBuf::from("."),
                hash: "abc123".to_string(),
            }
        );

        let args = parse(&["commit", "abc123", "-C", "/work/proj"]);
        assert_eq!(
            args.action,
            CliAction::Commit {
                dir: PathBuf::from("/work/proj"),
                hash: "abc123".to_string(),
            }
        );
    }

    #[test]
    fn test_merge_request_variants() {
        assert_eq!(
            parse(&["mr", "a.rs", "--line", "7"]).action,
            CliAction::MergeRequest {
                path: PathBuf::from("a.rs"),
                selection: Some(Selection::Lines(SelectionRange::single(7))),
                commit: None,
            }
        );
        assert_eq!(
            parse(&["mr", "a.rs", "--commit", "abc123"]).action,
            CliAction::MergeRequest {
                path: PathBuf::from("a.rs"),
                selection: None,
                commit: Some("abc123".to_string()),
            }
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(
            parse(&["status", "a.rs"]).action,
            CliAction::Status {
                path: PathBuf::from("a.rs"),
            }
        );
    }
}

mod rejected_tests {
    use super::*;

    use clap::error::ErrorKind;

    #[test]
    fn test_lines_and_offsets_together() {
        assert_eq!(
            parse_err(&["file", "a.rs", "-L", "1", "--offsets", "0:1"]),
            ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_commit_and_line_together() {
        assert_eq!(
            parse_err(&["mr", "a.rs", "-L", "1", "--commit", "abc"]),
            ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(parse_err(&["file", "a.rs", "-L", "0"]), ErrorKind::ValueValidation);
        assert_eq!(parse_err(&["file", "a.rs", "-L", "5-2"]), ErrorKind::ValueValidation);
        assert_eq!(
            parse_err(&["file", "a.rs", "--offsets", "4"]),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse_err(&["file", "a.rs", "--offsets", "9:4"]),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_missing_path() {
        assert_eq!(
            parse_err(&["file"]),
            ErrorKind::MissingRequiredArgument
        );
    }
}

mod targets_tests {
    use super::*;

    fn file_with(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("a.txt");
        std::fs::write(&path, contents).expect("Failed to write file");
        (dir, path)
    }

    #[test]
    fn test_offsets_become_lines() {
        let (_dir, path) = file_with("a\nb\nc\n");

        let action = CliAction::File {
            path: path.clone(),
            selection: Some(Selection::Offsets { start: 2, end: 5 }),
        };
        assert_eq!(
            action.browse_target().unwrap(),
            Some(BrowseTarget::File {
                path: path.clone(),
                selection: Some(SelectionRange::new(2, 3)),
            })
        );

        let action = CliAction::File {
            path: path.clone(),
            selection: Some(Selection::Offsets { start: 0, end: 4 }),
        };
        assert_eq!(
            action.browse_target().unwrap(),
            Some(BrowseTarget::File {
                path,
                selection: Some(SelectionRange::new(1, 2)),
            })
        );
    }

    #[test]
    fn test_offsets_after_multibyte_text() {
        let (_dir, path) = file_with("é\nb\nc\n");

        let action = CliAction::File {
            path: path.clone(),
            selection: Some(Selection::Offsets { start: 2, end: 3 }),
        };
        assert_eq!(
            action.browse_target().unwrap(),
            Some(BrowseTarget::File {
                path,
                selection: Some(SelectionRange::new(2, 2)),
            })
        );
    }

    #[test]
    fn test_merge_request_uses_the_first_selected_line() {
        let (_dir, path) = file_with("a\nb\nc\n");

        let action = CliAction::MergeRequest {
            path: path.clone(),
            selection: Some(Selection::Offsets { start: 4, end: 5 }),
            commit: None,
        };
        assert_eq!(
            action.browse_target().unwrap(),
            Some(BrowseTarget::MergeRequest {
                path,
                line: Some(3),
                commit: None,
            })
        );
    }

    #[test]
    fn test_offsets_in_a_missing_file() {
        let action = CliAction::File {
            path: PathBuf::from("/nonexistent/gitlab-browse/a.txt"),
            selection: Some(Selection::Offsets { start: 0, end: 1 }),
        };
        assert!(matches!(action.browse_target(), Err(BrowseError::Io(_))));
    }

    #[test]
    fn test_status_opens_nothing() {
        let action = CliAction::Status {
            path: PathBuf::from("a.rs"),
        };
        assert_eq!(action.browse_target().unwrap(), None);
    }
}
