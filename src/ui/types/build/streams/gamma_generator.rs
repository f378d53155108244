use crate::streams::generators::GammaGenerator;
use crate::ui::types::{build::BuildError, choices::GammaParameters};
use std::convert::TryFrom;

impl TryFrom<GammaParameters> for GammaGenerator {
    type Error = BuildError;

    fn try_from(parameters: GammaParameters) -> Result<Self, Self::Error> {
        GammaGenerator::new(parameters.shape, parameters.scale, parameters.seed)
            .map_err(BuildError::from_generator)
    }
}
