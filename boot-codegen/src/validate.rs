use kubeboot_core::{ApiVersion, Error, Result, to_lower_case};

pub(crate) fn domain(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::validation(
            "domain",
            domain,
            "a domain is required, e.g. --domain example.com",
        ));
    }
    Ok(())
}

pub(crate) fn group(group: &str) -> Result<()> {
    if group.is_empty() {
        return Err(Error::validation("group", group, "a group is required"));
    }
    if group != to_lower_case(group) {
        return Err(Error::validation(
            "group",
            group,
            format!("group must be lower case, try '{}'", to_lower_case(group)),
        ));
    }
    Ok(())
}

pub(crate) fn version(version: &str) -> Result<ApiVersion> {
    version.parse().map_err(|_| {
        Error::validation(
            "version",
            version,
            "expected v<N>, v<N>alpha<N> or v<N>beta<N> (e.g. v1, v1alpha1, v1beta1)",
        )
    })
}

pub(crate) fn kind(kind: &str) -> Result<()> {
    match kind.chars().next() {
        None => Err(Error::validation("kind", kind, "a kind is required")),
        Some(c) if !c.is_uppercase() => Err(Error::validation(
            "kind",
            kind,
            "kind must start with an upper-case letter",
        )),
        Some(_) => Ok(()),
    }
}

pub(crate) fn repo(repo: &str) -> Result<()> {
    if repo.is_empty() {
        return Err(Error::validation(
            "repo",
            repo,
            "the Go module path is required, pass --repo or add a go.mod",
        ));
    }
    Ok(())
}
