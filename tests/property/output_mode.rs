//! Output mode resolution and structured rendering properties.

use proptest::prelude::*;
use stratus::cli::{OutputMode, Renderable};
use stratus::remote::Account;

fn account_strategy() -> impl Strategy<Value = Account> {
    (
        "[a-zA-Z][a-zA-Z0-9@._-]{0,23}",
        "[a-z0-9._-]{1,12}@[a-z]{1,8}\\.com",
        proptest::collection::vec("[a-z_]{1,16}", 0..4),
        -1.0e9f64..1.0e9f64,
        0.0f64..1.0e6f64,
    )
        .prop_map(|(name, email, acls, balance, pending_charges)| Account {
            name,
            email,
            acls,
            balance,
            pending_charges,
            last_payment_date: "2024-05-01T10:00:00+00:00".to_string(),
            last_payment_amount: -balance,
        })
}

/// Unknown output flags always fail validation on the output field
#[test]
fn test_unknown_output_flag_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[a-z]{1,10}", |flag| {
            prop_assume!(!matches!(
                flag.as_str(),
                "human" | "text" | "json" | "yaml" | "yml"
            ));
            let err = OutputMode::resolve(Some(flag.as_str()), OutputMode::Human).unwrap_err();
            prop_assert_eq!(err.field.as_str(), "output");
            Ok(())
        })
        .unwrap();
}

/// JSON and YAML renderings parse back to the original account
#[test]
fn test_structured_account_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&account_strategy(), |account| {
            let value = account.render_structured();

            let json = serde_json::to_string_pretty(&value).unwrap();
            let from_json: serde_json::Value = serde_json::from_str(&json).unwrap();
            let decoded: Account = serde_json::from_value(from_json["account"].clone()).unwrap();
            prop_assert_eq!(&decoded, &account);

            let yaml = serde_yaml::to_string(&value).unwrap();
            let from_yaml: serde_json::Value = serde_yaml::from_str(&yaml).unwrap();
            let decoded: Account = serde_json::from_value(from_yaml["account"].clone()).unwrap();
            prop_assert_eq!(&decoded, &account);

            Ok(())
        })
        .unwrap();
}
