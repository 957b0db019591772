//! Map validated command-line arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{auth, ARG_DSN, ARG_PORT};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        jwt_secret: auth_opts.jwt_secret,
        token_ttl_seconds: auth_opts.token_ttl_seconds,
        cookie_secure: auth_opts.cookie_secure,
        hash_cost: auth_opts.hash_cost,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hotelhub::password::HashCost;
    use secrecy::ExposeSecret;

    #[test]
    fn server_action_from_args() {
        temp_env::with_vars(
            [
                ("HOTELHUB_PORT", None::<&str>),
                ("HOTELHUB_TOKEN_TTL", None),
                ("HOTELHUB_COOKIE_SECURE", None),
                ("HOTELHUB_HASH_MEMORY_KIB", None),
                ("HOTELHUB_HASH_ITERATIONS", None),
                ("HOTELHUB_HASH_PARALLELISM", None),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec![
                    "hotelhub",
                    "--dsn",
                    "memory://",
                    "--jwt-secret",
                    "signing-key",
                    "--hash-iterations",
                    "3",
                ]);

                let Action::Server(args) = handler(&matches).unwrap();
                assert_eq!(args.port, 8080);
                assert_eq!(args.dsn, "memory://");
                assert_eq!(args.jwt_secret.expose_secret(), "signing-key");
                assert_eq!(args.token_ttl_seconds, 86_400);
                assert!(!args.cookie_secure);
                assert_eq!(
                    args.hash_cost,
                    HashCost::new(HashCost::default().memory_kib, 3, 1)
                );
            },
        );
    }
}
