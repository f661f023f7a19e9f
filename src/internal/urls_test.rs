use super::*;

const BASE: &str = "http://gitlab.example.com/group/proj";

mod build_url_tests {
    use super::*;

    #[test]
    fn test_blob_url_with_selection() {
        assert_eq!(
            build_blob_url(BASE, "main", "/src/a.js", Some(SelectionRange::new(10, 12))),
            "http://gitlab.example.com/group/proj/blob/main/src/a.js#L10-12"
        );
    }

    #[test]
    fn test_blob_url_without_selection() {
        assert_eq!(
            build_blob_url(BASE, "feature/x", "/README.md", None),
            "http://gitlab.example.com/group/proj/blob/feature/x/README.md"
        );
    }

    #[test]
    fn test_blob_url_single_line_keeps_range_form() {
        assert_eq!(
            build_blob_url(BASE, "main", "/a", Some(SelectionRange::single(3))),
            format!("{BASE}/blob/main/a#L3-3")
        );
    }

    #[test]
    fn test_commit_url() {
        assert_eq!(
            build_commit_url(BASE, "abc123"),
            "http://gitlab.example.com/group/proj/commit/abc123"
        );
    }

    #[test]
    fn test_merge_request_url() {
        assert_eq!(
            build_merge_request_url(BASE, "42"),
            "http://gitlab.example.com/group/proj/merge_requests/42"
        );
    }
}

mod relative_path_tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_strips_the_root() {
        let root = PathBuf::from("/work/proj");
        assert_eq!(
            relative_path(&root, &root.join("src").join("a.js")).unwrap(),
            "/src/a.js"
        );
    }

    #[test]
    fn test_rejects_files_outside_the_root() {
        let root = PathBuf::from("/work/proj");
        let err = relative_path(&root, Path::new("/work/other/a.js")).unwrap_err();
        match err {
            BrowseError::PathNotUnderRoot { root: r, path } => {
                assert_eq!(r, root);
                assert_eq!(path, PathBuf::from("/work/other/a.js"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_sibling_with_common_prefix_is_outside() {
        let root = PathBuf::from("/work/proj");
        assert!(relative_path(&root, Path::new("/work/project/a.js")).is_err());
    }
}
