use crate::streams::generators::NormalGenerator;
use crate::ui::types::{build::BuildError, choices::NormalParameters};
use std::convert::TryFrom;

impl TryFrom<NormalParameters> for NormalGenerator {
    type Error = BuildError;

    fn try_from(parameters: NormalParameters) -> Result<Self, Self::Error> {
        NormalGenerator::new(parameters.mean, parameters.std_dev, parameters.seed)
            .map_err(BuildError::from_generator)
    }
}
