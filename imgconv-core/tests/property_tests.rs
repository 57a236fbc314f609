//! Property tests for format validation and filename rewriting

use imgconv_core::types::SUPPORTED_TOKENS;
use imgconv_core::{archive, replace_extension, validate, ArchiveEntry, FormatError, TargetFormat};
use proptest::prelude::*;

fn any_target() -> impl Strategy<Value = TargetFormat> {
    prop::sample::select(vec![
        TargetFormat::PNG,
        TargetFormat::JPG,
        TargetFormat::JPEG,
        TargetFormat::GIF,
    ])
}

proptest! {
    #[test]
    fn validator_rejects_everything_else(token in "\\PC*") {
        let result = validate(&token);
        if SUPPORTED_TOKENS.contains(&token.as_str()) {
            prop_assert!(result.is_ok());
        } else if token.is_empty() {
            prop_assert_eq!(result, Err(FormatError::Missing));
        } else {
            prop_assert_eq!(result, Err(FormatError::Unsupported(token.clone())));
        }
    }

    #[test]
    fn rewritten_name_ends_with_token(name in "[a-zA-Z0-9_./-]{0,40}", format in any_target()) {
        let rewritten = replace_extension(&name, format);
        let suffix = format!(".{}", format.extension());
        prop_assert!(rewritten.ends_with(&suffix));
    }

    #[test]
    fn rewriting_is_idempotent(name in "[a-zA-Z0-9_.-]{0,40}", format in any_target()) {
        let once = replace_extension(&name, format);
        prop_assert_eq!(replace_extension(&once, format), once.clone());
    }

    #[test]
    fn stem_without_dots_is_kept(stem in "[a-zA-Z0-9_-]{1,30}", ext in "[a-z]{1,4}", format in any_target()) {
        let name = format!("{}.{}", stem, ext);
        prop_assert_eq!(replace_extension(&name, format), format!("{}.{}", stem, format.extension()));
    }

    #[test]
    fn archive_builds_are_deterministic(
        files in prop::collection::vec(("[a-z]{1,12}\\.png", prop::collection::vec(any::<u8>(), 0..2048)), 0..6)
    ) {
        let entries: Vec<_> = files
            .into_iter()
            .map(|(name, bytes)| ArchiveEntry::new(name, bytes))
            .collect();
        let first = archive::build(&entries).unwrap();
        let second = archive::build(&entries).unwrap();
        prop_assert_eq!(first.len() % 512, 0);
        prop_assert_eq!(first, second);
    }
}
