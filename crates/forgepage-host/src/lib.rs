//! Splitting a request host into the forge group name and domain.
//!
//! A forge serves every project homepage from a host of the form
//! `{group_name}.{domain}`. The group name addresses the project's
//! metadata endpoint on the forge; the domain addresses the forge itself.

/// The two substrings derived from a request host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostParts {
    /// Text before the first period of the host.
    pub group_name: String,
    /// Text after the first period of the host.
    pub domain: String,
}

impl HostParts {
    /// Split a host at its first period.
    ///
    /// A host with no period yields both parts equal to the whole input.
    /// No port stripping, case folding, or validation is performed; a host
    /// carrying a port splits at the first period like any other string.
    pub fn parse(host: &str) -> HostParts {
        match host.split_once('.') {
            Some((group_name, domain)) => HostParts {
                group_name: group_name.to_string(),
                domain: domain.to_string(),
            },
            None => HostParts {
                group_name: host.to_string(),
                domain: host.to_string(),
            },
        }
    }
}
