use proptest::prelude::*;
use sync_fs::NormalizedPath;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));
        prop_assert!(!as_str.contains("//"));
        prop_assert!(!as_str.ends_with('/') || as_str == "/");

        // Normalizing twice changes nothing
        prop_assert_eq!(NormalizedPath::new(as_str), path.clone());
    }

    #[test]
    fn test_join_is_confined_for_plain_segments(
        a in "[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        b in "[a-z]{1,8}\\.[a-z]{1,3}",
    ) {
        let joined = NormalizedPath::new(&a).join(&b);

        prop_assert!(joined.is_confined());
        prop_assert!(joined.as_str().starts_with(&a));
        prop_assert_eq!(joined.file_name(), Some(b.as_str()));
        prop_assert_eq!(joined.parent(), Some(NormalizedPath::new(&a)));
    }
}
