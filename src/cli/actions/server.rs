use crate::{
    cli::telemetry,
    hotelhub::{
        self,
        password::{HashCost, Hasher},
        storage,
        token::TokenIssuer,
        AuthState,
    },
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub jwt_secret: SecretString,
    pub token_ttl_seconds: i64,
    pub cookie_secure: bool,
    pub hash_cost: HashCost,
}

/// Build the shared auth state from the parsed arguments.
///
/// # Errors
/// Returns an error if the hashing cost or token settings are invalid.
pub fn auth_state(args: &Args) -> Result<AuthState> {
    args.hash_cost
        .validate()
        .context("Invalid password hashing cost")?;

    let issuer = TokenIssuer::new(&args.jwt_secret, args.token_ttl_seconds)
        .context("Invalid session token settings")?;

    Ok(AuthState::new(Hasher::new(args.hash_cost), issuer).with_cookie_secure(args.cookie_secure))
}

/// Execute the server action.
/// # Errors
/// Returns an error if configuration is invalid, storage is unreachable, or the server fails.
pub async fn execute(args: Args) -> Result<()> {
    let auth = Arc::new(auth_state(&args)?);

    debug!("Hash cost: {:?}", args.hash_cost);
    info!("Using store {}", storage::redact_dsn(&args.dsn));

    let store = storage::connect(&args.dsn).await?;

    let result = hotelhub::new(args.port, store, auth).await;

    telemetry::shutdown_tracer();

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            port: 0,
            dsn: "memory://".to_string(),
            jwt_secret: SecretString::from("k"),
            token_ttl_seconds: 60,
            cookie_secure: true,
            hash_cost: HashCost::new(1024, 1, 1),
        }
    }

    #[test]
    fn auth_state_from_args() {
        let state = auth_state(&args()).unwrap();
        assert!(state.cookie_secure());
        assert_eq!(state.hasher().cost(), HashCost::new(1024, 1, 1));
        assert_eq!(state.issuer().ttl().whole_seconds(), 60);
    }

    #[test]
    fn bad_hash_cost_fails_fast() {
        let mut args = args();
        args.hash_cost = HashCost::new(1024, 1, 0);
        let err = auth_state(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid password hashing cost"));
    }

    #[test]
    fn empty_secret_fails_fast() {
        let mut args = args();
        args.jwt_secret = SecretString::from("");
        let err = auth_state(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid session token settings"));
    }
}
