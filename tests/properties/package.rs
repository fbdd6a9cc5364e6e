//! Property tests for recovering the package name from an RPM file name.

use proptest::prelude::*;

use remote_builder::domain::services::{package_prefix, rpm_suffix};
use remote_builder::BuilderError;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,20}").unwrap()
}

fn version() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{1,3}(\\.[0-9]{1,3}){0,2}").unwrap()
}

fn arch() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("x86_64".to_string()),
        Just("aarch64".to_string()),
        Just("noarch".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: name + suffix always splits back into the same name.
    #[test]
    fn property_prefix_round_trips(
        pkg in name(),
        ver in version(),
        release in 0u32..1000,
        arch in arch(),
    ) {
        let base = format!("{}{}", pkg, rpm_suffix(&ver, release, &arch));
        prop_assert_eq!(package_prefix(&base, &ver, release, &arch).unwrap(), pkg);
    }

    /// PROPERTY: a release that does not match the file name is rejected.
    #[test]
    fn property_mismatched_release_is_rejected(
        pkg in name(),
        ver in version(),
        release in 0u32..1000,
        arch in arch(),
    ) {
        let base = format!("{}{}", pkg, rpm_suffix(&ver, release, &arch));
        let err = package_prefix(&base, &ver, release + 1, &arch).unwrap_err();
        prop_assert!(matches!(err, BuilderError::VersionResolution(_)));
    }
}
