use git2::{Cred, CredentialType, RemoteCallbacks};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

/// libgit2 re-invokes the credential callback after every rejected attempt.
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Transfer progress bar on stderr, or `None` when quiet.
pub fn progress_bar(quiet: bool, label: &str) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} objects")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(label.to_string());
    Some(pb)
}

/// Reference updates the remote refused during a push.
#[derive(Debug, Default)]
pub struct PushRejections(RefCell<Vec<String>>);

impl PushRejections {
    pub fn into_message(self) -> Option<String> {
        let rejected = self.0.into_inner();
        if rejected.is_empty() {
            None
        } else {
            Some(rejected.join("; "))
        }
    }
}

/// Callbacks for fetch and push: credentials, progress and rejected refs.
pub fn remote_callbacks<'a>(
    config: &'a git2::Config,
    progress: Option<&'a ProgressBar>,
    rejections: Option<&'a PushRejections>,
) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts = 0usize;

    callbacks.credentials(move |url, username_from_url, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str(&format!(
                "authentication failed for '{url}'"
            )));
        }
        tracing::debug!(url, ?allowed, attempt = attempts, "credentials requested");

        if allowed.contains(CredentialType::USERNAME) {
            return Cred::username(username_from_url.unwrap_or("git"));
        }
        if allowed.contains(CredentialType::SSH_KEY) {
            return Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"));
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(cred) = Cred::credential_helper(config, url, username_from_url) {
                return Ok(cred);
            }
        }
        if allowed.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }
        Err(git2::Error::from_str(&format!(
            "no usable credentials for '{url}'"
        )))
    });

    if let Some(pb) = progress {
        callbacks.transfer_progress(move |stats| {
            pb.set_length(stats.total_objects() as u64);
            pb.set_position(stats.received_objects() as u64);
            true
        });
        callbacks.push_transfer_progress(move |current, total, _bytes| {
            pb.set_length(total as u64);
            pb.set_position(current as u64);
        });
    }

    if let Some(rejections) = rejections {
        callbacks.push_update_reference(move |refname, status| {
            if let Some(message) = status {
                rejections
                    .0
                    .borrow_mut()
                    .push(format!("{refname} rejected: {message}"));
            }
            Ok(())
        });
    }

    callbacks
}
