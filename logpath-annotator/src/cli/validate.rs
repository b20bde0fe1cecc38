use std::path::PathBuf;

use clap::Args;

use crate::{
    cli::{Error, read_payload, write_json},
    policy,
};

#[derive(Args, Clone)]
pub struct ValidateCommand {
    #[arg(
        short,
        long,
        help = "File holding the validation request as JSON. Reads standard input when omitted."
    )]
    pub request: Option<PathBuf>,
}

impl ValidateCommand {
    pub fn run(self) -> Result<(), Error> {
        let payload = read_payload(self.request.as_deref())?;
        let response = policy::validate(&payload);
        write_json(&response)
    }
}

#[derive(Args, Clone)]
pub struct ValidateSettingsCommand {
    #[arg(
        short,
        long,
        help = "File holding the policy settings as JSON. Reads standard input when omitted."
    )]
    pub settings: Option<PathBuf>,
}

impl ValidateSettingsCommand {
    pub fn run(self) -> Result<(), Error> {
        let payload = read_payload(self.settings.as_deref())?;
        let response = policy::validate_settings(&payload);
        write_json(&response)
    }
}
