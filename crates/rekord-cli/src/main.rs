//! rekord - record verified release artifacts in a Rekor log
//!
//! `rekord upload` downloads an artifact, checks its detached signature
//! against a public key and, only if that succeeds, submits an entry for it
//! to the configured Rekor server.

use clap::{Args, Parser, Subcommand};
use rekord::{UploadConfig, UploadRequest, Uploader, DEFAULT_REKOR_SERVER};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit status when the signature does not verify
const EXIT_VERIFICATION_FAILED: u8 = 2;

/// Exit status for every other failure
const EXIT_FAILURE: u8 = 1;

/// rekord - record verified release artifacts in a Rekor log
#[derive(Parser, Debug)]
#[command(name = "rekord")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Rekor server address
    #[arg(long, env = "REKOR_SERVER", default_value = DEFAULT_REKOR_SERVER, global = true)]
    rekor_server: String,

    /// Log filter used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a release artifact and upload its record to the log
    Upload(UploadArgs),
}

#[derive(Args, Debug)]
struct UploadArgs {
    /// URL of the release artifact
    #[arg(long, env = "REKOR_ARTIFACT_URL")]
    artifact_url: String,

    /// Detached signature over the artifact (armored or binary)
    #[arg(long, env = "REKOR_SIGNATURE")]
    signature: PathBuf,

    /// Public key of the signer (armored or binary)
    #[arg(long, env = "REKOR_PUBLIC_KEY")]
    public_key: PathBuf,

    /// Seconds allowed for the download and for the submission each
    #[arg(long, env = "REKOR_TIMEOUT", default_value_t = 180)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Upload(args) => upload(cli.rekor_server, args).await,
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn upload(rekor_server: String, args: UploadArgs) -> ExitCode {
    let config = UploadConfig::default()
        .with_rekor_server(rekor_server)
        .with_timeout(Duration::from_secs(args.timeout));
    let request = UploadRequest::new(args.artifact_url, args.signature, args.public_key);

    match Uploader::new(config).upload(&request).await {
        Ok(outcome) => {
            println!("Status: {}", outcome.result.status.file_received);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::from(exit_status(&e))
        }
    }
}

/// The one line written to stderr when a run fails
fn failure_message(e: &rekord::Error) -> String {
    if e.is_verification_failure() {
        format!("Signature verification failed, nothing was uploaded: {}", e)
    } else {
        format!("Upload failed: {}", e)
    }
}

fn exit_status(e: &rekord::Error) -> u8 {
    if e.is_verification_failure() {
        EXIT_VERIFICATION_FAILED
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "rekord",
            "upload",
            "--rekor-server",
            "http://rekor.local:3000",
            "--artifact-url",
            "https://example.com/release.tar.gz",
            "--signature",
            "release.tar.gz.sig",
            "--public-key",
            "release.pub",
            "--timeout",
            "30",
        ])
        .unwrap();

        assert_eq!(cli.rekor_server, "http://rekor.local:3000");
        let Commands::Upload(args) = cli.command;
        assert_eq!(args.artifact_url, "https://example.com/release.tar.gz");
        assert_eq!(args.signature, PathBuf::from("release.tar.gz.sig"));
        assert_eq!(args.timeout, 30);
    }

    #[test]
    fn test_default_rekor_server() {
        let cli = Cli::try_parse_from([
            "rekord",
            "upload",
            "--artifact-url",
            "https://example.com/a",
            "--signature",
            "a.sig",
            "--public-key",
            "a.pub",
        ])
        .unwrap();
        if std::env::var_os("REKOR_SERVER").is_none() {
            assert_eq!(cli.rekor_server, "http://localhost:3000");
        }
    }

    #[test]
    fn test_verification_failure_report() {
        let err = rekord::Error::Verification("Ed25519 signature invalid".to_string());
        assert_eq!(exit_status(&err), 2);
        let message = failure_message(&err);
        assert!(message.starts_with("Signature verification failed, nothing was uploaded"));
        assert_eq!(message.lines().count(), 1);
    }

    #[test]
    fn test_other_failure_report() {
        let err = rekord::Error::Fetch("GET https://x returned 500".to_string());
        assert_eq!(exit_status(&err), 1);
        assert_eq!(
            failure_message(&err),
            "Upload failed: artifact fetch failed: GET https://x returned 500"
        );
    }

    #[test]
    fn test_upload_requires_inputs() {
        let result = Cli::try_parse_from(["rekord", "upload", "--artifact-url", "https://x"]);
        assert!(result.is_err());
    }
}
