//! Command-line interface.

use clap::{Args, Parser, Subcommand};

use crate::config::{Settings, DEFAULT_TIMEOUT_SECS};
use crate::domain::RawInput;

#[derive(Debug, Parser)]
#[command(name = "cardiocheck")]
#[command(about = "Cardiovascular risk assessment client", version)]
pub struct Cli {
    /// Prediction service endpoint
    #[arg(long, env = "CARDIOCHECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CARDIOCHECK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive assessment form (default)
    Tui,
    /// Print the computed feature vector as JSON without contacting the service
    Features(VitalsArgs),
    /// Run one assessment and print the result as JSON
    Predict(VitalsArgs),
}

/// Vitals given on the command line.
///
/// Values are taken as text and go through the same permissive parsing as
/// the form.
#[derive(Debug, Clone, Args)]
pub struct VitalsArgs {
    /// Age in years
    #[arg(long, allow_hyphen_values = true)]
    pub age: String,
    /// 1 = female, 2 = male
    #[arg(long, default_value = "1")]
    pub gender: String,
    /// Systolic blood pressure (mmHg)
    #[arg(long = "ap-hi", allow_hyphen_values = true)]
    pub ap_hi: String,
    /// Diastolic blood pressure (mmHg)
    #[arg(long = "ap-lo", allow_hyphen_values = true)]
    pub ap_lo: String,
    /// 1 = normal, 2 = above normal, 3 = well above normal
    #[arg(long, default_value = "1")]
    pub cholesterol: String,
    /// 1 = normal, 2 = above normal, 3 = well above normal
    #[arg(long, default_value = "1")]
    pub gluc: String,
    #[arg(long, default_value = "0")]
    pub smoke: String,
    #[arg(long, default_value = "0")]
    pub alco: String,
    #[arg(long, default_value = "0")]
    pub active: String,
    /// Weight (kg)
    #[arg(long, allow_hyphen_values = true)]
    pub weight: String,
    /// Height (cm)
    #[arg(long, allow_hyphen_values = true)]
    pub height: String,
}

impl From<VitalsArgs> for RawInput {
    fn from(args: VitalsArgs) -> Self {
        Self {
            age: args.age,
            gender: args.gender,
            systolic_bp: args.ap_hi,
            diastolic_bp: args.ap_lo,
            cholesterol: args.cholesterol,
            glucose: args.gluc,
            smoker: args.smoke,
            alcohol: args.alco,
            active: args.active,
            weight: args.weight,
            height: args.height,
        }
    }
}

impl Cli {
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings::new(self.api_url.clone(), self.timeout_secs)
    }
}
