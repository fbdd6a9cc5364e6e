//! Property tests for locating the RPM in rpmbuild output.

use proptest::prelude::*;

use remote_builder::domain::services::{
    discover_rpm_artifact, remap_build_home, scan_wrote_line, ArtifactScan,
};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9_.-]{1,12}").unwrap()
}

fn noise_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 +%():/._-]{0,40}")
        .unwrap()
        .prop_filter("not a marker line", |s| !s.starts_with("Wrote"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: exactly the first `/root` becomes `/opt`; the rest is untouched.
    #[test]
    fn property_remap_replaces_only_first_root(
        before in proptest::collection::vec(segment(), 0..3),
        after in proptest::collection::vec(segment(), 0..4),
    ) {
        let head = before.iter().map(|s| format!("/{s}")).collect::<String>();
        let tail = after.iter().map(|s| format!("/{s}")).collect::<String>();
        prop_assume!(!head.contains("/root"));

        let path = format!("{head}/root{tail}/root/x.rpm");
        let remapped = remap_build_home(&path);

        prop_assert_eq!(remapped, format!("{head}/opt{tail}/root/x.rpm"));
    }

    /// PROPERTY: the first marker line wins, whatever surrounds it.
    #[test]
    fn property_first_wrote_line_is_found(
        prefix in proptest::collection::vec(noise_line(), 0..6),
        suffix in proptest::collection::vec(noise_line(), 0..6),
        name in segment(),
    ) {
        let first = format!("/root/rpmbuild/SRPMS/{name}.src.rpm");
        let second = format!("/root/rpmbuild/RPMS/x86_64/{name}.x86_64.rpm");
        let mut lines = prefix.clone();
        lines.push(format!("Wrote: {first}"));
        lines.push(format!("Wrote: {second}"));
        lines.extend(suffix.clone());
        let output = lines.join("\n");

        prop_assert_eq!(scan_wrote_line(&output), ArtifactScan::Found(first.clone()));
        prop_assert_eq!(
            discover_rpm_artifact(&output),
            Some(first.replacen("/root", "/opt", 1))
        );
    }

    /// PROPERTY: output with no marker line never yields an artifact.
    #[test]
    fn property_no_marker_is_not_found(
        lines in proptest::collection::vec(noise_line(), 0..12),
    ) {
        let output = lines.join("\n");
        prop_assert_eq!(scan_wrote_line(&output), ArtifactScan::NotFound);
        prop_assert_eq!(discover_rpm_artifact(&output), None);
    }
}
