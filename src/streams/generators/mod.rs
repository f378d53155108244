mod gamma_generator;
mod normal_generator;

pub use gamma_generator::GammaGenerator;
pub use normal_generator::NormalGenerator;
