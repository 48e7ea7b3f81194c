//! `chainid validate`: Validate registration-form input without
//! touching any provider.

use clap::Args;

use chainid_validation::{validate_registration_form, RegistrationInput};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Full legal name.
    #[arg(long, default_value = "")]
    pub full_name: String,

    /// Date of birth (YYYY-MM-DD).
    #[arg(long, default_value = "")]
    pub date_of_birth: String,

    /// Country of residence.
    #[arg(long, default_value = "")]
    pub country: String,
}

pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let input = RegistrationInput {
        full_name: args.full_name.clone(),
        date_of_birth: args.date_of_birth.clone(),
        country: args.country.clone(),
        government_id: None,
        selfie: None,
    };

    let errors = validate_registration_form(&input);
    if errors.is_empty() {
        println!("Input is VALID");
    } else {
        println!("Input is INVALID");
        println!();
        for err in &errors {
            println!("  [FAIL] {}: {}", err.field, err.message);
        }
    }

    Ok(())
}
