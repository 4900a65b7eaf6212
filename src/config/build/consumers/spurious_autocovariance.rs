use crate::config::build::BuildError;
use crate::config::choices::AutocovarianceParameters;
use crate::consumers::SpuriousAutocovariance;
use crate::core::Sample;

impl<S: Sample> TryFrom<AutocovarianceParameters> for SpuriousAutocovariance<S> {
    type Error = BuildError;

    fn try_from(p: AutocovarianceParameters) -> Result<Self, Self::Error> {
        SpuriousAutocovariance::new(p.lag_depth).map_err(BuildError::from)
    }
}
