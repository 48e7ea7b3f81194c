//! `chainid verify`: Seed an identity and verify one attribute through
//! the gasless-session flow.

use clap::Args;

use chainid_core::{AttributeType, VerificationRequest, WalletAddress};
use chainid_identity::AuthSession;
use chainid_validation::RegistrationInput;

use super::demo_stack;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Wallet address of the user to verify.
    #[arg(short, long)]
    pub wallet: String,

    /// Attribute to verify (age_over_18, age_over_21,
    /// country_verification, kyc_complete, credential_check).
    #[arg(short, long, default_value = "age_over_18")]
    pub attribute: String,

    /// Identifier of the requesting dApp.
    #[arg(long, default_value = "chainid-cli")]
    pub dapp: String,

    /// Full legal name for the seeded profile.
    #[arg(long)]
    pub full_name: String,

    /// Date of birth for the seeded profile (YYYY-MM-DD).
    #[arg(long)]
    pub date_of_birth: String,

    /// Country for the seeded profile.
    #[arg(long)]
    pub country: String,
}

pub async fn run(args: &VerifyArgs) -> anyhow::Result<()> {
    let wallet = WalletAddress::new(args.wallet.clone())?;
    let attribute: AttributeType = args.attribute.parse()?;
    let stack = demo_stack();

    // Seed the sandbox with a registered identity.
    let session = AuthSession::establish(wallet.clone());
    let input = RegistrationInput {
        full_name: args.full_name.clone(),
        date_of_birth: args.date_of_birth.clone(),
        country: args.country.clone(),
        government_id: None,
        selfie: None,
    };
    stack.registration.register(&session, &input).await?;

    let request = VerificationRequest {
        user_address: wallet,
        attribute,
        dapp_id: args.dapp.clone(),
        session_id: None,
    };
    let result = stack.verification.verify(&request).await?;

    if result.verified {
        println!("{}: VERIFIED", attribute.label());
    } else {
        println!("{}: NOT VERIFIED", attribute.label());
    }
    if let Some(tx) = &result.tx_hash {
        println!("  attestation tx: {}", tx);
    }
    if let Some(proof) = &result.proof {
        println!("  proof:          {}", proof);
    }

    Ok(())
}
