//! Validation is pure: the same raw input always yields the same options.

use proptest::prelude::*;
use stratus::command::{CommandUnit, RawInput, RegionListCommand};

/// Valid pagination input validates to the same options every time
#[test]
fn test_region_list_validate_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1u32..=500, proptest::option::of("[A-Za-z0-9][A-Za-z0-9=_-]{0,31}")),
            |(per_page, cursor)| {
                let per_page_arg = per_page.to_string();
                let mut args = vec!["--per-page".to_string(), per_page_arg];
                if let Some(ref cursor) = cursor {
                    args.push("--cursor".to_string());
                    args.push(cursor.clone());
                }
                let raw = RawInput::parse(&RegionListCommand, args).unwrap();

                let first = RegionListCommand.validate(&raw).unwrap();
                let second = RegionListCommand.validate(&raw).unwrap();
                prop_assert_eq!(&first, &second);
                prop_assert_eq!(first.list.per_page, Some(per_page));
                prop_assert_eq!(first.list.cursor, cursor);

                Ok(())
            },
        )
        .unwrap();
}

/// Out-of-range page sizes are always rejected on the per-page field
#[test]
fn test_region_list_rejects_out_of_range_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(501u32..100_000), |per_page| {
            let raw =
                RawInput::parse(&RegionListCommand, ["--per-page".to_string(), per_page.to_string()])
                    .unwrap();
            let err = RegionListCommand.validate(&raw).unwrap_err();
            prop_assert_eq!(err.field.as_str(), "per-page");
            Ok(())
        })
        .unwrap();
}
