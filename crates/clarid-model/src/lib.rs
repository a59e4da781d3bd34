pub mod error;
pub mod mapping;
pub mod operation;

pub use error::{ConvertError, Result};
pub use mapping::{FieldMapping, MappingConfig, SUBJECT_ID_FIELD};
pub use operation::{
    AgeGroup, DurationBinOptions, DurationUnit, MultivalueOptions, Operation, Rounding,
};
