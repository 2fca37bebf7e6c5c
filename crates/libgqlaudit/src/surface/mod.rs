//! Schema-independent structural checks over extracted blocks.

mod constraint_compat;
mod model_validator;
mod operation_validator;
mod scalar_leaf;
mod surface_rules;
mod surface_validator;

pub use constraint_compat::constraint_fits_type;
pub use scalar_leaf::looks_like_scalar_leaf;
pub use surface_rules::SurfaceRules;
pub use surface_validator::SurfaceValidator;
pub use surface_validator::validate_surface;
use model_validator::ModelValidator;
use operation_validator::OperationValidator;

#[cfg(test)]
mod tests;
