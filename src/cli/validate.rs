use crate::errors::{Result, StrataError};

/// A branch name git would accept for `refs/heads/<name>`.
pub fn stratum_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(StrataError::InvalidArguments(
            "stratum name must not be empty".into(),
        ));
    }
    if name == "HEAD"
        || name.starts_with('-')
        || !git2::Reference::is_valid_name(&format!("refs/heads/{name}"))
    {
        return Err(StrataError::InvalidArguments(format!(
            "'{name}' is not a valid stratum name"
        )));
    }
    Ok(name)
}

pub fn remote_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(StrataError::InvalidArguments(
            "remote vault name must not be empty".into(),
        ));
    }
    if !git2::Remote::is_valid_name(name) {
        return Err(StrataError::InvalidArguments(format!(
            "'{name}' is not a valid remote vault name"
        )));
    }
    Ok(name)
}

pub fn non_empty<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(StrataError::InvalidArguments(format!(
            "{what} must not be empty"
        )));
    }
    Ok(value)
}
