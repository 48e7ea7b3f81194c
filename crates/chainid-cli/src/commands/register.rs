//! `chainid register`: Run the full registration pipeline against the
//! in-memory providers.

use clap::Args;

use chainid_core::WalletAddress;
use chainid_identity::{AuthSession, IdentityError};
use chainid_validation::RegistrationInput;

use super::demo_stack;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Wallet address to register (0x + 40 hex digits).
    #[arg(short, long)]
    pub wallet: String,

    /// Full legal name.
    #[arg(long)]
    pub full_name: String,

    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    pub date_of_birth: String,

    /// Country of residence.
    #[arg(long)]
    pub country: String,
}

pub async fn run(args: &RegisterArgs) -> anyhow::Result<()> {
    let wallet = WalletAddress::new(args.wallet.clone())?;
    let session = AuthSession::establish(wallet);
    let stack = demo_stack();

    let input = RegistrationInput {
        full_name: args.full_name.clone(),
        date_of_birth: args.date_of_birth.clone(),
        country: args.country.clone(),
        government_id: None,
        selfie: None,
    };

    match stack.registration.register(&session, &input).await {
        Ok(identity) => {
            println!("Identity registered");
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
        Err(IdentityError::InvalidInput(errors)) => {
            println!("Registration rejected");
            println!();
            for err in &errors {
                println!("  [FAIL] {}: {}", err.field, err.message);
            }
            anyhow::bail!("registration input invalid");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
