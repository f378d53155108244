use crate::streams::SampleStream;
use crate::streams::generators::{GammaGenerator, NormalGenerator};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::DistributionChoice;

mod gamma_generator;
mod normal_generator;

pub fn build_stream(choice: DistributionChoice) -> Result<Box<dyn SampleStream>, BuildError> {
    match choice {
        DistributionChoice::Gamma(p) => {
            let s = GammaGenerator::try_from(p)?;
            Ok(Box::new(s))
        }
        DistributionChoice::Normal(p) => {
            let s = NormalGenerator::try_from(p)?;
            Ok(Box::new(s))
        }
    }
}
