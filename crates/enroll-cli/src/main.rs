//! enroll-admin - bootstrap a Fabric CA administrator into a wallet.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match enroll_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
