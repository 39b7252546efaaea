use anyhow::{Context, anyhow, bail};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use clap::Parser;

use bearer_session::config::{DEFAULT_EXPIRY_UTC_OFFSET, parse_utc_offset};
use bearer_session::services::auth::{TokenIssuer, jwt::SessionKeys};
use bearer_session::services::identity::Identity;

/// Issue a session token for a login, signed with the service's secret.
///
/// Intended for operators and local testing; no credential check is made.
/// Outputs:
/// - the bearer token
/// - its subject and expiration (in the fixed offset)
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Login to put in the `sub` claim
    #[arg(long, required_unless_present = "generate_secret")]
    login: Option<String>,

    /// HMAC secret. Defaults to TOKEN_SECRET (a .env file is honoured).
    #[arg(long, env = "TOKEN_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Fixed UTC offset for the expiration, e.g. -03:00
    #[arg(long, env = "TOKEN_EXPIRY_UTC_OFFSET", default_value = DEFAULT_EXPIRY_UTC_OFFSET)]
    offset: String,

    /// Print a fresh random secret suitable for TOKEN_SECRET and exit
    #[arg(long, default_value_t = false)]
    generate_secret: bool,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn generate_secret() -> anyhow::Result<String> {
    // 32 bytes of entropy -> URL-safe base64 without padding.
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes).map_err(|e| anyhow!("getrandom failed: {e}"))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.generate_secret {
        println!("{}", generate_secret()?);
        return Ok(());
    }

    let login = args.login.context("--login is required")?;
    if login.trim().is_empty() {
        bail!("--login must not be empty");
    }

    let secret = args
        .secret
        .filter(|s| !s.trim().is_empty())
        .context("no secret: pass --secret or set TOKEN_SECRET")?;

    let offset = parse_utc_offset(args.offset.trim())
        .with_context(|| format!("invalid offset {:?} (expected ±HH:MM)", args.offset))?;

    let keys = SessionKeys::from_secret(&secret)?;
    let issuer = TokenIssuer::new(keys, offset);

    let now = Utc::now();
    let token = issuer.issue_at(&Identity::user(login.as_str()), now)?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("token: {}", token);
    println!("sub: {}", login);
    println!("exp: {}", issuer.expires_at(now).to_rfc3339());
    println!("header: Authorization: Bearer {}", token);

    Ok(())
}
