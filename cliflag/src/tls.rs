//! TLS cipher suite and protocol version names accepted on command lines.
//!
//! Identifiers are the IANA registry values.

use crate::error::FlagError;

/// Cipher suites without known weaknesses.
const SECURE_CIPHER_SUITES: &[(&str, u16)] = &[
    ("TLS_AES_128_GCM_SHA256", 0x1301),
    ("TLS_AES_256_GCM_SHA384", 0x1302),
    ("TLS_CHACHA20_POLY1305_SHA256", 0x1303),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA", 0xc009),
    ("TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA", 0xc00a),
    ("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA", 0xc013),
    ("TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA", 0xc014),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256", 0xc02b),
    ("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384", 0xc02c),
    ("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256", 0xc02f),
    ("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384", 0xc030),
    ("TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256", 0xcca8),
    ("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256", 0xcca9),
];

/// Cipher suites still accepted for compatibility.
const INSECURE_CIPHER_SUITES: &[(&str, u16)] = &[
    ("TLS_RSA_WITH_RC4_128_SHA", 0x0005),
    ("TLS_RSA_WITH_3DES_EDE_CBC_SHA", 0x000a),
    ("TLS_RSA_WITH_AES_128_CBC_SHA", 0x002f),
    ("TLS_RSA_WITH_AES_256_CBC_SHA", 0x0035),
    ("TLS_RSA_WITH_AES_128_CBC_SHA256", 0x003c),
    ("TLS_RSA_WITH_AES_128_GCM_SHA256", 0x009c),
    ("TLS_RSA_WITH_AES_256_GCM_SHA384", 0x009d),
    ("TLS_ECDHE_ECDSA_WITH_RC4_128_SHA", 0xc007),
    ("TLS_ECDHE_RSA_WITH_RC4_128_SHA", 0xc011),
    ("TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA", 0xc012),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256", 0xc023),
    ("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256", 0xc027),
];

/// Names that predate the `_SHA256` suffix on the CHACHA20 suites.
const LEGACY_CIPHER_ALIASES: &[(&str, u16)] = &[
    ("TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305", 0xcca8),
    ("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305", 0xcca9),
];

const TLS_VERSIONS: &[(&str, u16)] = &[
    ("VersionTLS10", 0x0301),
    ("VersionTLS11", 0x0302),
    ("VersionTLS12", 0x0303),
    ("VersionTLS13", 0x0304),
];

fn cipher_suite_id(name: &str) -> Option<u16> {
    SECURE_CIPHER_SUITES
        .iter()
        .chain(INSECURE_CIPHER_SUITES)
        .chain(LEGACY_CIPHER_ALIASES)
        .find_map(|&(known, id)| (known == name).then_some(id))
}

/// Maps cipher suite names to their identifiers, keeping input order and
/// duplicates.
///
/// # Errors
///
/// Returns [`FlagError::UnsupportedCipherSuite`] for the first unknown name;
/// no partial result is produced.
///
/// # Examples
///
/// ```
/// use cliflag::tls::tls_cipher_suites;
///
/// let ids = tls_cipher_suites(&["TLS_AES_128_GCM_SHA256", "TLS_RSA_WITH_RC4_128_SHA"])?;
/// assert_eq!(ids, [0x1301, 0x0005]);
/// assert!(tls_cipher_suites::<&str>(&[])?.is_empty());
/// # Ok::<(), cliflag::FlagError>(())
/// ```
pub fn tls_cipher_suites<S: AsRef<str>>(names: &[S]) -> Result<Vec<u16>, FlagError> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            cipher_suite_id(name).ok_or_else(|| FlagError::UnsupportedCipherSuite(name.to_owned()))
        })
        .collect()
}

/// Every accepted cipher suite name except the legacy aliases, sorted.
#[must_use]
pub fn tls_cipher_possible_values() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = SECURE_CIPHER_SUITES
        .iter()
        .chain(INSECURE_CIPHER_SUITES)
        .map(|&(name, _)| name)
        .collect();
    names.sort_unstable();
    names
}

/// Maps a TLS version name to its protocol identifier.
///
/// The empty string means "no preference" and maps to `0`.
///
/// # Errors
///
/// Returns [`FlagError::UnsupportedTlsVersion`] for unknown names.
pub fn tls_version(name: &str) -> Result<u16, FlagError> {
    if name.is_empty() {
        return Ok(0);
    }
    TLS_VERSIONS
        .iter()
        .find_map(|&(known, id)| (known == name).then_some(id))
        .ok_or_else(|| FlagError::UnsupportedTlsVersion(name.to_owned()))
}

/// Every accepted TLS version name, sorted.
#[must_use]
pub fn tls_possible_versions() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = TLS_VERSIONS.iter().map(|&(name, _)| name).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::happy(
        &["TLS_RSA_WITH_RC4_128_SHA", "TLS_RSA_WITH_AES_128_CBC_SHA", "TLS_ECDHE_RSA_WITH_RC4_128_SHA", "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA"],
        &[0x0005, 0x002f, 0xc011, 0xc013],
    )]
    #[case::single(&["TLS_RSA_WITH_RC4_128_SHA"], &[0x0005])]
    #[case::empty(&[], &[])]
    #[case::duplicates(
        &["TLS_RSA_WITH_RC4_128_SHA", "TLS_RSA_WITH_AES_128_CBC_SHA", "TLS_RSA_WITH_RC4_128_SHA"],
        &[0x0005, 0x002f, 0x0005],
    )]
    #[case::legacy_aliases(
        &["TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305", "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256"],
        &[0xcca8, 0xcca9],
    )]
    fn known_names_map_in_order(#[case] names: &[&str], #[case] expected: &[u16]) {
        assert_eq!(tls_cipher_suites(names).expect("known suites"), expected);
    }

    #[rstest]
    fn unknown_names_fail_without_partial_result() {
        let err = tls_cipher_suites(&["TLS_AES_128_GCM_SHA256", "foo"]).expect_err("foo is unknown");
        assert_eq!(err.to_string(), "cipher suite foo not supported or doesn't exist");
    }

    #[rstest]
    fn every_possible_value_is_accepted() {
        let names = tls_cipher_possible_values();
        assert_eq!(names.len(), SECURE_CIPHER_SUITES.len() + INSECURE_CIPHER_SUITES.len());
        assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
        let ids = tls_cipher_suites(names.as_slice()).expect("all listed names resolve");
        assert_eq!(ids.len(), names.len());
    }

    #[rstest]
    #[case("", 0)]
    #[case("VersionTLS10", 0x0301)]
    #[case("VersionTLS12", 0x0303)]
    #[case("VersionTLS13", 0x0304)]
    fn versions_resolve(#[case] name: &str, #[case] expected: u16) {
        assert_eq!(tls_version(name).expect("known version"), expected);
    }

    #[rstest]
    fn unknown_versions_are_errors() {
        assert!(matches!(
            tls_version("VersionSSL30"),
            Err(FlagError::UnsupportedTlsVersion(_))
        ));
        assert_eq!(
            tls_possible_versions(),
            ["VersionTLS10", "VersionTLS11", "VersionTLS12", "VersionTLS13"]
        );
    }
}
